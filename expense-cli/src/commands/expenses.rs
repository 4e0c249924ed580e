//! Expense CLI commands - talk to a running expense server over HTTP
//!
//! ```bash
//! expensectl expenses create --title "iPhone 17 Pro Max 2TB" --amount 76900 --tag gadget
//! expensectl expenses list --json | jq '.[] | {id, title}'
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use expense_server::{Expense, ExpenseInput};

// ============================================================================
// Main Args
// ============================================================================

#[derive(Parser, Debug)]
pub struct ExpensesArgs {
    /// Expense API endpoint
    #[arg(
        long,
        env = "EXPENSES_ENDPOINT",
        default_value = "http://localhost:2565",
        global = true
    )]
    pub endpoint: String,

    /// Basic Auth username
    #[arg(long, env = "AUTH_USERNAME", global = true)]
    pub username: Option<String>,

    /// Basic Auth password
    #[arg(long, env = "AUTH_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Raw Authorization header value, sent instead of Basic credentials
    #[arg(long, env = "AUTH_TOKEN", hide_env_values = true, global = true)]
    pub auth_header: Option<String>,

    /// Print raw JSON (for piping to jq)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: ExpensesCommands,
}

#[derive(Subcommand, Debug)]
pub enum ExpensesCommands {
    /// Create a new expense
    Create(FieldsArgs),
    /// Show one expense
    Get(IdArgs),
    /// Replace every field of an expense
    Update(UpdateArgs),
    /// List all expenses
    List,
}

#[derive(Parser, Debug)]
pub struct IdArgs {
    /// Expense ID
    pub id: String,
}

#[derive(Parser, Debug)]
pub struct FieldsArgs {
    /// Expense title
    #[arg(long, short)]
    pub title: String,

    /// Amount (integer, no currency)
    #[arg(long, short, allow_negative_numbers = true)]
    pub amount: i32,

    /// Free-form note
    #[arg(long, short, default_value = "")]
    pub note: String,

    /// Tag (can specify multiple, order preserved)
    #[arg(long)]
    pub tag: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Expense ID
    pub id: String,

    #[command(flatten)]
    pub fields: FieldsArgs,
}

impl From<FieldsArgs> for ExpenseInput {
    fn from(args: FieldsArgs) -> Self {
        Self {
            title: args.title,
            amount: args.amount,
            note: args.note,
            tags: args.tag,
        }
    }
}

// ============================================================================
// API Response Types (matching server)
// ============================================================================

#[derive(Deserialize, Debug)]
struct MessageResponse {
    message: String,
}

// ============================================================================
// Main Dispatcher
// ============================================================================

pub async fn run_expenses(args: ExpensesArgs) -> Result<()> {
    let api = ExpenseClient::new(&args)?;

    match args.command {
        ExpensesCommands::Create(fields) => {
            let expense = api.create(&fields.into()).await?;
            print_expenses(std::slice::from_ref(&expense), args.json)
        }
        ExpensesCommands::Get(id) => {
            let expense = api.get(&id.id).await?;
            print_expenses(std::slice::from_ref(&expense), args.json)
        }
        ExpensesCommands::Update(update) => {
            let ack = api.update(&update.id, &update.fields.into()).await?;
            if args.json {
                println!("{}", serde_json::json!({ "message": ack }));
            } else {
                println!("{} (id {})", ack, update.id);
            }
            Ok(())
        }
        ExpensesCommands::List => {
            let expenses = api.list().await?;
            print_expenses(&expenses, args.json)
        }
    }
}

// ============================================================================
// HTTP Client
// ============================================================================

/// Authorization sent with every request
#[derive(Debug, Clone, PartialEq, Eq)]
enum Credentials {
    Basic { username: String, password: String },
    Raw(String),
}

fn resolve_credentials(args: &ExpensesArgs) -> Result<Credentials> {
    if let Some(ref raw) = args.auth_header {
        return Ok(Credentials::Raw(raw.clone()));
    }

    match (&args.username, &args.password) {
        (Some(username), Some(password)) => Ok(Credentials::Basic {
            username: username.clone(),
            password: password.clone(),
        }),
        _ => Err(anyhow!(
            "Credentials required. Use --username/--password (AUTH_USERNAME/AUTH_PASSWORD) or --auth-header (AUTH_TOKEN)"
        )),
    }
}

struct ExpenseClient {
    client: Client,
    endpoint: Url,
    credentials: Credentials,
}

impl ExpenseClient {
    fn new(args: &ExpensesArgs) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        let endpoint = Url::parse(&args.endpoint)
            .with_context(|| format!("Invalid endpoint URL: {}", args.endpoint))?;

        Ok(Self {
            client,
            endpoint,
            credentials: resolve_credentials(args)?,
        })
    }

    /// Endpoint plus path segments, each segment percent-encoded
    /// (so an id containing `/`, `?` or `#` stays one segment).
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Endpoint cannot carry a path: {}", self.endpoint))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Credentials::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }
            Credentials::Raw(value) => builder.header(reqwest::header::AUTHORIZATION, value),
        }
    }

    async fn create(&self, input: &ExpenseInput) -> Result<Expense> {
        let request = self.client.post(self.url(&["expenses"])?).json(input);
        send(self.authorize(request)).await
    }

    async fn get(&self, id: &str) -> Result<Expense> {
        let request = self.client.get(self.url(&["expenses", id])?);
        send(self.authorize(request)).await
    }

    async fn update(&self, id: &str, input: &ExpenseInput) -> Result<String> {
        let request = self.client.put(self.url(&["expenses", id])?).json(input);
        let ack: MessageResponse = send(self.authorize(request)).await?;
        Ok(ack.message)
    }

    async fn list(&self) -> Result<Vec<Expense>> {
        let request = self.client.get(self.url(&["expenses"])?);
        send(self.authorize(request)).await
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request
        .send()
        .await
        .context("Failed to connect to expense API")?;

    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.context("Failed to parse response");
    }

    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(anyhow!(error_message(status, &text)))
}

fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<MessageResponse>(body) {
        Ok(err) => format!("{}: {}", status, err.message),
        Err(_) => format!("{}: {}", status, body),
    }
}

// ============================================================================
// Output
// ============================================================================

fn print_expenses(expenses: &[Expense], json: bool) -> Result<()> {
    if json {
        if let [single] = expenses {
            println!("{}", serde_json::to_string_pretty(single)?);
        } else {
            println!("{}", serde_json::to_string_pretty(expenses)?);
        }
        return Ok(());
    }

    if expenses.is_empty() {
        println!("(no expenses)");
        return Ok(());
    }

    for expense in expenses {
        println!("{}", render_line(expense));
    }
    Ok(())
}

fn render_line(expense: &Expense) -> String {
    let mut line = format!("#{} {} ({})", expense.id, expense.title, expense.amount);
    if !expense.tags.is_empty() {
        line.push_str(&format!(" [{}]", expense.tags.join(", ")));
    }
    if !expense.note.is_empty() {
        line.push_str(&format!(" - {}", expense.note));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ExpensesArgs {
        let mut argv = vec!["expenses"];
        argv.extend_from_slice(args);
        ExpensesArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn basic_credentials_from_flags() {
        let args = parse(&["--username", "apidesign", "--password", "45678", "list"]);
        assert_eq!(
            resolve_credentials(&args).unwrap(),
            Credentials::Basic {
                username: "apidesign".into(),
                password: "45678".into()
            }
        );
    }

    #[test]
    fn raw_header_wins() {
        let args = parse(&["--auth-header", "November 10, 2009", "--username", "x", "list"]);
        assert_eq!(
            resolve_credentials(&args).unwrap(),
            Credentials::Raw("November 10, 2009".into())
        );
    }

    #[test]
    fn create_fields_become_input() {
        let args = parse(&[
            "create", "--title", "tea", "--amount", "-40", "--tag", "food", "--tag", "drink",
        ]);
        let ExpensesCommands::Create(fields) = args.command else {
            panic!("expected create");
        };
        let input = ExpenseInput::from(fields);
        assert_eq!(input.amount, -40);
        assert_eq!(input.note, "");
        assert_eq!(input.tags, vec!["food", "drink"]);
    }

    fn client_for(endpoint: &str) -> ExpenseClient {
        let args = parse(&["--endpoint", endpoint, "--auth-header", "x", "list"]);
        ExpenseClient::new(&args).unwrap()
    }

    #[test]
    fn id_is_encoded_as_one_path_segment() {
        let client = client_for("http://localhost:2565");
        let url = client.url(&["expenses", "1/2?x#y"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:2565/expenses/1%2F2%3Fx%23y");
    }

    #[test]
    fn endpoint_base_path_is_kept() {
        let client = client_for("http://example.com/api/");
        let url = client.url(&["expenses", "7"]).unwrap();
        assert_eq!(url.as_str(), "http://example.com/api/expenses/7");

        let client = client_for("http://example.com/api");
        let url = client.url(&["expenses"]).unwrap();
        assert_eq!(url.as_str(), "http://example.com/api/expenses");
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let args = parse(&["--endpoint", "not a url", "--auth-header", "x", "list"]);
        assert!(ExpenseClient::new(&args).is_err());
    }

    #[test]
    fn error_message_prefers_server_message() {
        let msg = error_message(StatusCode::NOT_FOUND, r#"{"message":"expense not found"}"#);
        assert_eq!(msg, "404 Not Found: expense not found");

        let msg = error_message(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(msg, "502 Bad Gateway: upstream down");
    }

    #[test]
    fn render_line_includes_tags_and_note() {
        let expense = Expense {
            id: 3,
            title: "book".into(),
            amount: 300,
            note: "gift".into(),
            tags: vec!["reading".into()],
        };
        assert_eq!(render_line(&expense), "#3 book (300) [reading] - gift");
    }
}
