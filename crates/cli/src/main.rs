//! Roster CLI - Command-line client for the Roster employee records service

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9527";

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Roster employee records CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "ROSTER_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List all employees
    List,

    /// Show one employee by code
    Get {
        /// Employee code
        code: String,
    },

    /// Add a new employee
    Add(EmployeeArgs),

    /// Update the employee with the given code (projects are replaced)
    Update(EmployeeArgs),

    /// Delete an employee by code
    Delete {
        /// Employee code
        code: String,
    },
}

#[derive(Args)]
struct EmployeeArgs {
    /// Employee code (business key)
    #[arg(short, long)]
    code: String,

    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    dob: String,

    #[arg(short, long)]
    department: String,

    #[arg(long)]
    designation: String,

    /// Project name (repeatable)
    #[arg(short, long = "project")]
    projects: Vec<String>,
}

impl EmployeeArgs {
    fn to_params(&self) -> serde_json::Value {
        json!({
            "firstName": self.first_name,
            "lastName": self.last_name,
            "code": self.code,
            "dateOfBirth": self.dob,
            "details": {
                "department": { "name": self.department },
                "designation": { "name": self.designation },
            },
            "projects": self
                .projects
                .iter()
                .map(|name| json!({ "name": name }))
                .collect::<Vec<_>>(),
        })
    }
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize)]
struct Named {
    name: String,
}

#[derive(Deserialize)]
struct Details {
    department: Named,
    designation: Named,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Employee {
    first_name: String,
    last_name: String,
    code: String,
    date_of_birth: String,
    details: Option<Details>,
    #[serde(default)]
    projects: Vec<Named>,
}

#[derive(Tabled)]
struct EmployeeRow {
    code: String,
    name: String,
    born: String,
    department: String,
    designation: String,
    projects: String,
}

impl From<Employee> for EmployeeRow {
    fn from(employee: Employee) -> Self {
        let (department, designation) = match employee.details {
            Some(d) => (d.department.name, d.designation.name),
            None => ("-".to_string(), "-".to_string()),
        };

        Self {
            code: employee.code,
            name: format!("{} {}", employee.first_name, employee.last_name),
            born: employee.date_of_birth,
            department,
            designation,
            projects: employee
                .projects
                .into_iter()
                .map(|p| p.name)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to server")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

fn print_employees(employees: Vec<Employee>) {
    let rows: Vec<EmployeeRow> = employees.into_iter().map(EmployeeRow::from).collect();
    println!("{}", Table::new(rows));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            let result = call_rpc(&cli.rpc_url, "employee.list.v1", json!([])).await?;
            let employees: Vec<Employee> = serde_json::from_value(result)?;

            if employees.is_empty() {
                println!("{}", "No employees".yellow());
            } else {
                println!("{}", format!("{} employee(s)", employees.len()).cyan().bold());
                print_employees(employees);
            }
        }

        Commands::Get { code } => {
            let result = call_rpc(&cli.rpc_url, "employee.get.v1", json!({ "code": code })).await?;
            let employee: Employee = serde_json::from_value(result)?;
            print_employees(vec![employee]);
        }

        Commands::Add(args) => {
            let result = call_rpc(&cli.rpc_url, "employee.add.v1", args.to_params()).await?;
            println!(
                "{}",
                format!("✓ Employee {} added (id {})", args.code, result["id"])
                    .green()
                    .bold()
            );
        }

        Commands::Update(args) => {
            call_rpc(&cli.rpc_url, "employee.update.v1", args.to_params()).await?;
            println!(
                "{}",
                format!("✓ Employee {} updated", args.code).green().bold()
            );
        }

        Commands::Delete { code } => {
            call_rpc(&cli.rpc_url, "employee.delete.v1", json!({ "code": code })).await?;
            println!("{}", format!("✓ Employee {} deleted", code).green().bold());
        }
    }

    Ok(())
}
