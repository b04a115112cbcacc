//! Direct-engine walkthrough: build a blog, sneak in an invalid post,
//! validate the serialized value against the registry, and report what
//! the validator finds.

use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use veritype::observability::{self, Logger};
use veritype::schema::{FieldDef, FieldType, Schema, SchemaRegistry, SchemaValidator};

#[derive(Serialize)]
struct Post {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    rating: f64,
    #[serde(rename = "createAt")]
    create_at: chrono::DateTime<Utc>,
}

#[derive(Serialize)]
struct Blog {
    site: String,
    about: String,
    email: String,
    posts: Vec<Post>,
}

fn schemas() -> Vec<Schema> {
    vec![
        Schema::new(
            "Post",
            vec![
                FieldDef::required("title", FieldType::String),
                FieldDef::optional("description", FieldType::String),
                FieldDef::required("rating", FieldType::Number),
                FieldDef::required("createAt", FieldType::DateTime),
            ],
        ),
        Schema::new(
            "Blog",
            vec![
                FieldDef::required("site", FieldType::String),
                FieldDef::required("about", FieldType::String),
                FieldDef::required("email", FieldType::String),
                FieldDef::required("posts", FieldType::array(FieldType::reference("Post"))),
            ],
        ),
    ]
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = SchemaRegistry::new();
    for schema in schemas() {
        registry.register(schema)?;
    }
    registry.verify()?;

    let blog = Blog {
        site: "rehanvdm.com".into(),
        email: "rehan.nope@gmail.com".into(),
        about: "My blog, the one I never have time to write for but do it anyway.".into(),
        posts: vec![Post {
            title: "Valid Post".into(),
            description: None,
            rating: 5.0,
            create_at: Utc::now(),
        }],
    };

    // Serialize to the canonical form, then force an invalid post into the
    // array — the static types would never allow building one directly.
    let mut candidate = serde_json::to_value(&blog)?;
    if let Some(posts) = candidate["posts"].as_array_mut() {
        posts.push(json!({
            "title": "Invalid Post! Missing createAt, forcing by casting",
            "rating": 1
        }));
    }

    let validator = SchemaValidator::new(&registry);
    let result = validator.validate("Blog", &candidate)?;

    if result.is_valid() {
        Logger::info("BLOG_VALID", &[("site", &blog.site)]);
        Ok(())
    } else {
        observability::report_failures("Blog", result.failures());
        Err("blog not valid".into())
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
