use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};

use roomsched::api::types::Credentials;
use roomsched::schedule::{extract_day_lectures, flatten_student_schedule};
use roomsched::view::today_lectures;
use roomsched::{ApiClient, ApiConfig, ApiError, DayKey, MemorySessionStore, StudyType};

#[derive(Parser)]
#[command(name = "roomsched")]
#[command(about = "Room and schedule lookup for the college API", long_about = None)]
struct Cli {
    /// Base URL of the remote API.
    #[arg(long, default_value = "http://localhost:8000/")]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a room and its lectures for today
    Room { code: String },
    /// Print a room's weekly schedule
    Schedule {
        code: String,
        /// morning or evening; inferred from the current hour when omitted
        #[arg(long)]
        study_type: Option<StudyType>,
        /// Limit output to one day (e.g. "sunday")
        #[arg(long)]
        day: Option<DayKey>,
    },
    /// Search rooms by free text
    Search {
        query: String,
        #[arg(long)]
        department: Option<String>,
    },
    /// List departments
    Departments,
    /// Show a room's announcements
    Announcements { code: String },
    /// Show a student and their full weekly schedule
    Student { id: String },
    /// Log in and print the returned profile
    Login { username: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = ApiConfig {
        base_url: cli.base_url.clone(),
        ..ApiConfig::default()
    };
    let session = Arc::new(MemorySessionStore::new());
    let client = ApiClient::new(config, session).context("failed to construct API client")?;

    let result = run(&client, cli.command).await;
    if let Err(err) = result {
        // Inline localized message, mirroring the alert the views showed.
        eprintln!("{}", err.user_message());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(client: &ApiClient, command: Commands) -> Result<(), ApiError> {
    match command {
        Commands::Room { code } => {
            let info = client.room_info(&code).await?;
            println!(
                "{} ({}){}",
                info.name.as_deref().unwrap_or(&info.code),
                info.code,
                info.department_name
                    .as_deref()
                    .map(|d| format!(" - {d}"))
                    .unwrap_or_default()
            );

            let today = today_lectures(client, &code, Utc::now()).await?;
            if today.lectures.is_empty() {
                println!("no lectures today ({})", today.day);
                return Ok(());
            }
            println!("today ({}, {}):", today.day, today.study_type);
            for lecture in &today.lectures {
                println!(
                    "  {:>5} - {:>5}  [{}] {}",
                    lecture.entry.start_time,
                    lecture.entry.end_time,
                    lecture.stage,
                    lecture.entry.subject_name
                );
            }
        }
        Commands::Schedule {
            code,
            study_type,
            day,
        } => {
            let study_type =
                study_type.unwrap_or_else(|| roomsched::schedule::infer_study_type(Utc::now()));
            let schedule = client.room_schedule(&code, study_type).await?;
            if schedule.is_empty() {
                println!("no {study_type} schedule for room {code}");
                return Ok(());
            }
            let days: Vec<DayKey> = match day {
                Some(d) => vec![d],
                None => DayKey::ALL.to_vec(),
            };
            for day in days {
                let lectures = extract_day_lectures(&schedule, day);
                if lectures.is_empty() {
                    continue;
                }
                println!("{day}:");
                for lecture in lectures {
                    println!(
                        "  {:>5} - {:>5}  [{}] {}",
                        lecture.entry.start_time,
                        lecture.entry.end_time,
                        lecture.stage,
                        lecture.entry.subject_name
                    );
                }
            }
        }
        Commands::Search { query, department } => {
            let rooms = client.search_rooms(&query, department.as_deref()).await?;
            if rooms.is_empty() {
                println!("no rooms matched \"{query}\"");
            }
            for room in rooms {
                println!(
                    "{}  {}{}",
                    room.code,
                    room.name.as_deref().unwrap_or("-"),
                    room.department_name
                        .as_deref()
                        .map(|d| format!("  ({d})"))
                        .unwrap_or_default()
                );
            }
        }
        Commands::Departments => {
            for department in client.departments().await? {
                println!("{}  {}", department.id, department.name);
            }
        }
        Commands::Announcements { code } => {
            let announcements = client.room_announcements(&code).await?;
            if announcements.is_empty() {
                println!("no announcements for room {code}");
            }
            for announcement in announcements {
                println!("* {}", announcement.title);
                if let Some(body) = &announcement.body {
                    println!("  {body}");
                }
            }
        }
        Commands::Student { id } => {
            let student = client.student(&id).await?;
            println!("{} ({})", student.name, student.id);
            let rows = client.student_schedule(&id).await?;
            for entry in flatten_student_schedule(&rows) {
                println!(
                    "  {:<9} {}  {}",
                    entry.day.as_str(),
                    entry.time_12h,
                    entry.row.subject_name
                );
            }
        }
        Commands::Login { username } => {
            let password = prompt_password();
            let session = client
                .login(&Credentials {
                    username,
                    password,
                })
                .await?;
            println!(
                "logged in as {} ({})",
                session.user.name,
                session.user.role.as_deref().unwrap_or("user")
            );
        }
    }
    Ok(())
}

fn prompt_password() -> String {
    print!("password: ");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
    line.trim_end_matches(['\r', '\n']).to_string()
}
