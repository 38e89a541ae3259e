//! Ujeebu CLI - command-line access to the scraping, extraction, and SERP APIs

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Map, Value};
use std::io::{self, Write};
use std::path::PathBuf;
use ujeebu::{run_one, Client, Credentials, InputItem, Operation, OutputItem, Resource};

/// SERP search vertical
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum SerpKind {
    /// Google web search
    #[default]
    Web,
    /// Google News
    News,
    /// Google Images
    Images,
    /// Google Videos
    Videos,
    /// Google Maps / local businesses
    Maps,
}

impl SerpKind {
    fn operation(self) -> Operation {
        match self {
            SerpKind::Web => Operation::WebSearch,
            SerpKind::News => Operation::NewsSearch,
            SerpKind::Images => Operation::ImageSearch,
            SerpKind::Videos => Operation::VideoSearch,
            SerpKind::Maps => Operation::MapsSearch,
        }
    }
}

/// Ujeebu - web scraping, article extraction, and Google SERP
#[derive(Parser, Debug)]
#[command(name = "ujeebu")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API key (falls back to UJEEBU_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Base URL override (falls back to UJEEBU_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract article content into structured JSON
    Article {
        /// URL of the article to extract
        url: String,

        /// Extra wire parameters as a JSON object
        #[arg(long)]
        options: Option<String>,
    },
    /// Get rendered HTML of a web page
    Html {
        /// URL to scrape
        url: String,

        /// Comma-separated tags/selectors to remove after rendering
        #[arg(long)]
        strip_tags: Option<String>,

        /// Extra wire parameters as a JSON object
        #[arg(long)]
        options: Option<String>,
    },
    /// Capture a screenshot of a web page
    Screenshot {
        /// URL to capture
        url: String,

        /// Capture the full scrollable page
        #[arg(long)]
        full_page: bool,

        /// CSS selector of a single element to capture
        #[arg(long, conflicts_with = "coords")]
        selector: Option<String>,

        /// Pixel region to capture
        #[arg(long, num_args = 4, value_names = ["X", "Y", "WIDTH", "HEIGHT"])]
        coords: Option<Vec<i64>>,

        /// Write the PNG to this path instead of printing base64
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Extra wire parameters as a JSON object
        #[arg(long)]
        options: Option<String>,
    },
    /// Convert a web page to PDF
    Pdf {
        /// URL to convert
        url: String,

        /// Write the PDF to this path instead of printing base64
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Extra wire parameters as a JSON object
        #[arg(long)]
        options: Option<String>,
    },
    /// Extract structured data using CSS selector rules
    ExtractRules {
        /// URL to extract data from
        url: String,

        /// Extraction rules as a JSON object
        #[arg(long)]
        rules: String,

        /// Extra wire parameters as a JSON object
        #[arg(long)]
        options: Option<String>,
    },
    /// Google search results
    Serp {
        /// Search vertical
        #[arg(long, value_enum, default_value = "web")]
        kind: SerpKind,

        /// The search query
        query: String,

        /// Extra wire parameters as a JSON object
        #[arg(long)]
        options: Option<String>,
    },
    /// Show account and quota information (also validates credentials)
    Account,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let credentials = match resolve_credentials(cli.api_key, cli.base_url) {
        Ok(credentials) => credentials,
        Err(message) => {
            eprintln!("Error: {message}");
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

    if let Err(message) = run(&client, cli.command).await {
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
}

fn resolve_credentials(
    api_key: Option<String>,
    base_url: Option<String>,
) -> Result<Credentials, String> {
    let credentials = match api_key {
        Some(key) => Ok(Credentials::new(key)),
        None => Credentials::from_env().map_err(|err| err.to_string()),
    }?;
    match base_url {
        Some(base_url) => credentials
            .with_base_url(base_url)
            .map_err(|err| err.to_string()),
        None => Ok(credentials),
    }
}

async fn run(client: &Client, command: Commands) -> Result<(), String> {
    match command {
        Commands::Article { url, options } => {
            let item = article_item(&url, parse_options(options.as_deref())?);
            let output = execute(client, Resource::Extract, Operation::Article, item).await?;
            print_output(&output)
        }
        Commands::Html {
            url,
            strip_tags,
            options,
        } => {
            let item = html_item(&url, strip_tags.as_deref(), parse_options(options.as_deref())?);
            let output = execute(client, Resource::Scrape, Operation::GetHtml, item).await?;
            print_output(&output)
        }
        Commands::Screenshot {
            url,
            full_page,
            selector,
            coords,
            output,
            options,
        } => {
            let item = screenshot_item(
                &url,
                full_page,
                selector.as_deref(),
                coords.as_deref(),
                output.is_some(),
                parse_options(options.as_deref())?,
            )?;
            let result = execute(client, Resource::Scrape, Operation::Screenshot, item).await?;
            finish_binary(result, output, "screenshot")
        }
        Commands::Pdf {
            url,
            output,
            options,
        } => {
            let item = pdf_item(&url, output.is_some(), parse_options(options.as_deref())?);
            let result = execute(client, Resource::Scrape, Operation::Pdf, item).await?;
            finish_binary(result, output, "pdf")
        }
        Commands::ExtractRules {
            url,
            rules,
            options,
        } => {
            let item = extract_rules_item(&url, &rules, parse_options(options.as_deref())?);
            let output = execute(client, Resource::Scrape, Operation::ExtractRules, item).await?;
            print_output(&output)
        }
        Commands::Serp {
            kind,
            query,
            options,
        } => {
            let item = serp_item(&query, parse_options(options.as_deref())?);
            let output = execute(client, Resource::Serp, kind.operation(), item).await?;
            print_output(&output)
        }
        Commands::Account => {
            let account = client.account().await.map_err(|err| err.to_string())?;
            let rendered = serde_json::to_string_pretty(&account)
                .map_err(|err| err.to_string())?;
            writeln_safe(&rendered);
            Ok(())
        }
    }
}

async fn execute(
    client: &Client,
    resource: Resource,
    operation: Operation,
    item: InputItem,
) -> Result<OutputItem, String> {
    run_one(client, resource, operation, item)
        .await
        .map_err(|err| err.to_string())
}

fn parse_options(options: Option<&str>) -> Result<Map<String, Value>, String> {
    match options {
        None => Ok(Map::new()),
        Some(raw) => {
            let parsed: Value = serde_json::from_str(raw)
                .map_err(|err| format!("--options must be a JSON object: {err}"))?;
            match parsed {
                Value::Object(map) => Ok(map),
                _ => Err("--options must be a JSON object".to_string()),
            }
        }
    }
}

fn article_item(url: &str, options: Map<String, Value>) -> InputItem {
    object(json!({ "url": url, "options": options }))
}

fn html_item(url: &str, strip_tags: Option<&str>, options: Map<String, Value>) -> InputItem {
    object(json!({
        "url": url,
        "strip_tags": strip_tags.unwrap_or_default(),
        "options": options,
    }))
}

fn screenshot_item(
    url: &str,
    full_page: bool,
    selector: Option<&str>,
    coords: Option<&[i64]>,
    to_file: bool,
    options: Map<String, Value>,
) -> Result<InputItem, String> {
    let region = match (selector, coords) {
        (Some(selector), _) => json!({"mode": "selector", "selector": selector}),
        (None, Some(&[x, y, width, height])) => {
            json!({"mode": "coordinates", "x": x, "y": y, "width": width, "height": height})
        }
        (None, Some(_)) => return Err("--coords takes exactly four values".to_string()),
        (None, None) => json!({"mode": "none"}),
    };

    Ok(object(json!({
        "url": url,
        "full_page": full_page,
        "region": region,
        "output_binary": to_file,
        "options": options,
    })))
}

fn pdf_item(url: &str, to_file: bool, options: Map<String, Value>) -> InputItem {
    object(json!({
        "url": url,
        "output_binary": to_file,
        "options": options,
    }))
}

fn extract_rules_item(url: &str, rules: &str, options: Map<String, Value>) -> InputItem {
    object(json!({
        "url": url,
        "rules": {"mode": "json", "rules": rules},
        "options": options,
    }))
}

fn serp_item(query: &str, options: Map<String, Value>) -> InputItem {
    object(json!({ "search": query, "options": options }))
}

fn object(value: Value) -> InputItem {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn print_output(output: &OutputItem) -> Result<(), String> {
    let rendered =
        serde_json::to_string_pretty(&output.json).map_err(|err| err.to_string())?;
    writeln_safe(&rendered);
    Ok(())
}

/// Write any binary attachment to the given path, then print the JSON part
fn finish_binary(
    output: OutputItem,
    path: Option<PathBuf>,
    name: &str,
) -> Result<(), String> {
    if let (Some(path), Some(binary)) = (path, output.binary.as_ref()) {
        let attachment = binary
            .get(name)
            .ok_or_else(|| format!("response carried no {name} payload"))?;
        let bytes = attachment.decode().map_err(|err| err.to_string())?;
        std::fs::write(&path, bytes)
            .map_err(|err| format!("failed to write {}: {err}", path.display()))?;
    }
    print_output(&output)
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_accepts_object_or_nothing() {
        assert!(parse_options(None).unwrap().is_empty());

        let options = parse_options(Some(r#"{"js": true, "timeout": 90}"#)).unwrap();
        assert_eq!(options.get("js"), Some(&json!(true)));

        assert!(parse_options(Some("[1, 2]")).is_err());
        assert!(parse_options(Some("not json")).is_err());
    }

    #[test]
    fn test_screenshot_item_region_variants() {
        let item = screenshot_item("https://example.com", true, None, None, true, Map::new())
            .unwrap();
        assert_eq!(item["region"], json!({"mode": "none"}));
        assert_eq!(item["full_page"], json!(true));
        assert_eq!(item["output_binary"], json!(true));

        let item = screenshot_item(
            "https://example.com",
            false,
            Some("#main"),
            None,
            false,
            Map::new(),
        )
        .unwrap();
        assert_eq!(item["region"], json!({"mode": "selector", "selector": "#main"}));
        assert_eq!(item["output_binary"], json!(false));

        let item = screenshot_item(
            "https://example.com",
            false,
            None,
            Some(&[0, 0, 800, 600]),
            true,
            Map::new(),
        )
        .unwrap();
        assert_eq!(
            item["region"],
            json!({"mode": "coordinates", "x": 0, "y": 0, "width": 800, "height": 600})
        );
    }

    #[test]
    fn test_extract_rules_item_uses_json_mode() {
        let item = extract_rules_item(
            "https://example.com",
            r#"{"title": {"selector": "h1", "type": "text"}}"#,
            Map::new(),
        );
        assert_eq!(item["rules"]["mode"], json!("json"));
        assert!(item["rules"]["rules"].is_string());
    }

    #[test]
    fn test_serp_kind_operations() {
        assert_eq!(SerpKind::Web.operation(), Operation::WebSearch);
        assert_eq!(SerpKind::Maps.operation(), Operation::MapsSearch);
    }
}
