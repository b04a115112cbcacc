//! Type-assertion walkthrough: the same blog scenario, but through
//! `ensure_type`, with the two error classes handled distinctly — a
//! missing schema means the deployment is broken, an invalid value means
//! the input is.

use std::sync::OnceLock;

use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use veritype::ensure::{ensure, ensure_type, EnsureError, TypedSchema};
use veritype::observability::{self, Logger};
use veritype::schema::{FieldDef, FieldType, Schema, SchemaRegistry};

#[derive(Debug, Serialize)]
struct Post {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    rating: f64,
    #[serde(rename = "createAt")]
    create_at: chrono::DateTime<Utc>,
}

impl TypedSchema for Post {
    const NAME: &'static str = "Post";

    fn schema() -> Schema {
        Schema::new(
            "Post",
            vec![
                FieldDef::required("title", FieldType::String),
                FieldDef::optional("description", FieldType::String),
                FieldDef::required("rating", FieldType::Number),
                FieldDef::required("createAt", FieldType::DateTime),
            ],
        )
    }
}

#[derive(Debug, Serialize)]
struct Blog {
    site: String,
    about: String,
    email: String,
    posts: Vec<Post>,
}

impl TypedSchema for Blog {
    const NAME: &'static str = "Blog";

    fn schema() -> Schema {
        Schema::new(
            "Blog",
            vec![
                FieldDef::required("site", FieldType::String),
                FieldDef::required("about", FieldType::String),
                FieldDef::required("email", FieldType::String),
                FieldDef::required("posts", FieldType::array(FieldType::reference("Post"))),
            ],
        )
    }
}

/// Process-wide registry, built once on first use.
fn registry() -> &'static SchemaRegistry {
    static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut registry = SchemaRegistry::new();
        registry.register_type::<Post>().expect("register Post");
        registry.register_type::<Blog>().expect("register Blog");
        registry
    })
}

fn report(err: &EnsureError) {
    match err {
        EnsureError::SchemaNotFound(missing) => {
            Logger::error("SCHEMA_NOT_FOUND", &[("error", &missing.to_string())]);
        }
        EnsureError::Invalid(type_error) => {
            observability::report_failures(&type_error.schema, &type_error.failures);
            Logger::error("TYPE_ERROR", &[("summary", &type_error.summary)]);
        }
        EnsureError::Serialize(e) => {
            Logger::error("SERIALIZE_FAILED", &[("error", &e.to_string())]);
        }
    }
}

fn main() {
    // Passes: a well-formed post keeps its native timestamp on the way out.
    let post = Post {
        title: "Quick way to ensure the value is valid".into(),
        description: Some("Just initialize it differently, like this".into()),
        rating: 5.0,
        create_at: Utc::now(),
    };
    match ensure::<Post>(registry(), post) {
        Ok(post) => Logger::info("POST_VALID", &[("title", &post.title)]),
        Err(err) => report(&err),
    }

    // Fails: a blog whose serialized form hides an invalid post.
    let candidate = json!({
        "site": "rehanvdm.com",
        "email": "rehan.nope@gmail.com",
        "about": "My blog, the one I never have time to write for but do it anyway.",
        "posts": [
            { "title": "Valid Post", "rating": 5, "createAt": "2024-01-15T10:30:00.000Z" },
            { "title": "Invalid Post! Missing createAt", "rating": 1 }
        ]
    });
    match ensure_type(registry(), "Blog", candidate) {
        Ok(_) => Logger::info("BLOG_VALID", &[]),
        Err(err) => report(&err),
    }

    // Fails differently: nobody registered a Comment schema.
    match ensure_type(registry(), "Comment", json!({ "body": "hi" })) {
        Ok(_) => Logger::info("COMMENT_VALID", &[]),
        Err(err) => report(&err),
    }
}
