use crate::id::{next_id, now};
use awe_data::{Entity, FieldDescriptor};

awe_data::entity! {
    /// A registered account.
    pub struct User {
        table = "users";
        id: FieldDescriptor::string().primary_key().ddl("varchar(50)").default_with(next_id),
        email: FieldDescriptor::string().ddl("varchar(50)"),
        passwd: FieldDescriptor::string().ddl("varchar(50)"),
        admin: FieldDescriptor::boolean(),
        name: FieldDescriptor::string().ddl("varchar(50)"),
        image: FieldDescriptor::string().ddl("varchar(500)"),
        created_at: FieldDescriptor::float().default_with(now),
    }
}

impl User {
    pub fn with_account(email: &str, passwd: &str, name: &str) -> Self {
        let mut user = Self::new();
        user.set("email", email);
        user.set("passwd", passwd);
        user.set("name", name);
        user
    }

    /// Stored flags may come back as `0`/`1`.
    pub fn is_admin(&self) -> bool {
        self.value("admin").as_bool().unwrap_or(false)
    }
}
