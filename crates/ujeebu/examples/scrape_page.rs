//! Example: scrape a page three ways and print the results
//!
//! Run with: UJEEBU_API_KEY=... cargo run -p ujeebu --example scrape_page
//!
//! This example drives the HTML, extraction-rules, and SERP operations
//! against the live API with one client.

use serde_json::json;
use ujeebu::{run_one, Client, Credentials, InputItem, Operation, Resource};

fn item(value: serde_json::Value) -> InputItem {
    value.as_object().cloned().unwrap_or_default()
}

#[tokio::main]
async fn main() {
    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    let client = match Client::new(credentials) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    let cases: &[(&str, Resource, Operation, InputItem)] = &[
        (
            "Rendered HTML",
            Resource::Scrape,
            Operation::GetHtml,
            item(json!({
                "url": "https://example.com",
                "options": {"js": false},
            })),
        ),
        (
            "Extraction rules",
            Resource::Scrape,
            Operation::ExtractRules,
            item(json!({
                "url": "https://example.com",
                "rules": {
                    "mode": "builder",
                    "rules": [
                        {"field_name": "title", "selector": "h1", "type": "text"},
                        {"field_name": "links", "selector": "a", "type": "link", "multiple": true},
                    ],
                },
            })),
        ),
        (
            "Web search",
            Resource::Serp,
            Operation::WebSearch,
            item(json!({
                "search": "web scraping API",
                "options": {"results_count": 3},
            })),
        ),
    ];

    for (label, resource, operation, input) in cases {
        println!("== {label} ==");
        match run_one(&client, *resource, *operation, input.clone()).await {
            Ok(output) => {
                let preview = output.json.to_string();
                let preview: String = preview.chars().take(200).collect();
                println!("{preview}...\n");
            }
            Err(err) => {
                println!("Error: {err}\n");
            }
        }
    }
}
