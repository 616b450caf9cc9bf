//! # awe-models: entities of the blog application
//!
//! [`User`], [`Blog`] and [`Comment`] map to the `users`, `blogs` and
//! `comments` tables. Every primary key defaults to [`next_id`] and every
//! `created_at` to [`now`], so a fresh instance only needs its content
//! fields before `save`.

pub mod blog;
pub mod comment;
pub mod id;
pub mod user;

pub use blog::Blog;
pub use comment::Comment;
pub use id::{next_id, now};
pub use user::User;

use awe_data::{Entity, EntitySchema};

/// Derive every entity schema now.
///
/// Declaration mistakes then surface at startup instead of on first use.
pub fn register_all() -> Vec<&'static EntitySchema> {
    vec![User::schema(), Blog::schema(), Comment::schema()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use awe_data::Value;

    #[test]
    fn test_tables() {
        let tables: Vec<_> = register_all().into_iter().map(|s| s.table()).collect();
        assert_eq!(tables, ["users", "blogs", "comments"]);
    }

    #[test]
    fn test_user_templates() {
        let schema = User::schema();
        assert_eq!(schema.primary_key(), "id");
        assert_eq!(
            schema.select_sql(),
            "select `id`, `email`, `passwd`, `admin`, `name`, `image`, `created_at` from `users`"
        );
        assert_eq!(
            schema.insert_sql(),
            "insert into `users` (`email`, `passwd`, `admin`, `name`, `image`, `created_at`, `id`) values (?, ?, ?, ?, ?, ?, ?)"
        );
        assert_eq!(
            schema.update_sql(),
            "update `users` set `email`=?, `passwd`=?, `admin`=?, `name`=?, `image`=?, `created_at`=? where `id`=?"
        );
        assert_eq!(schema.delete_sql(), "delete from `users` where `id`=?");
    }

    #[test]
    fn test_column_types() {
        let blog = Blog::schema();
        assert_eq!(blog.field("summary").unwrap().column_type(), "varchar(200)");
        assert_eq!(blog.field("content").unwrap().column_type(), "text");
        assert_eq!(User::schema().field("admin").unwrap().column_type(), "boolean");
        assert_eq!(Comment::schema().field("created_at").unwrap().column_type(), "real");
    }

    #[test]
    fn test_defaults() {
        let mut user = User::with_account("a@example.com", "secret", "Ann");
        assert!(!user.is_admin());
        assert_eq!(user.value_or_default("admin"), Value::Bool(false));
        assert!(matches!(user.value_or_default("created_at"), Value::Float(_)));
        assert!(matches!(user.value_or_default("id"), Value::Text(ref s) if s.len() == id::ID_LEN));
        assert_eq!(user.value_or_default("image"), Value::Null);
    }

    #[test]
    fn test_blog_copies_author() {
        let mut author = User::with_account("a@example.com", "secret", "Ann");
        author.set("id", "u-1");
        author.set("image", "http://img/ann.png");
        let blog = Blog::by(&author, "Hello", "first post", "body");
        assert_eq!(blog.value("user_id"), Value::from("u-1"));
        assert_eq!(blog.value("user_name"), Value::from("Ann"));
        assert_eq!(blog.value("user_image"), Value::from("http://img/ann.png"));

        let comment = Comment::on(&blog, &author, "nice");
        assert_eq!(comment.value("blog_id"), Value::Null);
        assert_eq!(comment.value("user_id"), Value::from("u-1"));
    }
}
