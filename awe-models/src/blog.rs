use crate::id::{next_id, now};
use crate::user::User;
use awe_data::{Entity, FieldDescriptor};

awe_data::entity! {
    /// A published article, carrying a copy of its author's display data.
    pub struct Blog {
        table = "blogs";
        id: FieldDescriptor::string().primary_key().ddl("varchar(50)").default_with(next_id),
        user_id: FieldDescriptor::string().ddl("varchar(50)"),
        user_name: FieldDescriptor::string().ddl("varchar(50)"),
        user_image: FieldDescriptor::string().ddl("varchar(500)"),
        name: FieldDescriptor::string().ddl("varchar(50)"),
        summary: FieldDescriptor::string().ddl("varchar(200)"),
        content: FieldDescriptor::text(),
        created_at: FieldDescriptor::float().default_with(now),
    }
}

impl Blog {
    /// A draft authored by `author`.
    pub fn by(author: &User, name: &str, summary: &str, content: &str) -> Self {
        let mut blog = Self::new();
        blog.set("user_id", author.id());
        blog.set("user_name", author.value("name"));
        blog.set("user_image", author.value("image"));
        blog.set("name", name);
        blog.set("summary", summary);
        blog.set("content", content);
        blog
    }
}
