use crate::id::{next_id, now};
use crate::user::User;
use awe_data::{Entity, FieldDescriptor};

awe_data::entity! {
    pub struct Comment {
        table = "comments";
        id: FieldDescriptor::string().primary_key().ddl("varchar(50)").default_with(next_id),
        blog_id: FieldDescriptor::string().ddl("varchar(50)"),
        user_id: FieldDescriptor::string().ddl("varchar(50)"),
        user_name: FieldDescriptor::string().ddl("varchar(50)"),
        user_image: FieldDescriptor::string().ddl("varchar(500)"),
        content: FieldDescriptor::text(),
        created_at: FieldDescriptor::float().default_with(now),
    }
}

impl Comment {
    pub fn on(blog: &impl Entity, author: &User, content: &str) -> Self {
        let mut comment = Self::new();
        comment.set("blog_id", blog.id());
        comment.set("user_id", author.id());
        comment.set("user_name", author.value("name"));
        comment.set("user_image", author.value("image"));
        comment.set("content", content);
        comment
    }
}
