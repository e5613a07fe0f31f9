use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use client::app::{App, Page};
use client::notice::{Notice, Notifier};
use client::pages::detail::SessionDetail;
use client::pages::form::SessionFormPage;
use client::pages::login::LoginPage;
use client::pages::register::RegisterPage;
use client::router::{History, Route};
use client::AppContext;
use secrecy::{ExposeSecret, SecretString};
use shared::{SessionId, TeacherId};
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Book yoga sessions from the terminal")]
struct Cli {
    #[command(flatten)]
    client: client::Config,

    #[arg(long, global = true, help = "Account email", env = "YOGA_EMAIL")]
    email: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Account password",
        env = "YOGA_PASSWORD",
        hide_env_values = true
    )]
    password: Option<SecretString>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check the credentials and print the identity
    Login,
    /// Create an account with the given email and password
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    #[command(subcommand)]
    Sessions(SessionsCommand),
    /// List teachers
    Teachers,
    #[command(subcommand)]
    Me(MeCommand),
}

#[derive(Debug, Subcommand)]
enum SessionsCommand {
    List,
    Show {
        id: SessionId,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, help = "Session day, YYYY-MM-DD")]
        date: NaiveDate,
        #[arg(long)]
        teacher_id: TeacherId,
        #[arg(long)]
        description: String,
    },
    /// Change the given fields, keep the others
    Update {
        id: SessionId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        teacher_id: Option<TeacherId>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: SessionId,
    },
    Participate {
        id: SessionId,
    },
    Unparticipate {
        id: SessionId,
    },
}

#[derive(Debug, Subcommand)]
enum MeCommand {
    Show,
    Delete,
}

struct PrintNotices;

impl Notifier for PrintNotices {
    fn open(&self, notice: Notice) {
        println!("{}", notice.message());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    debug!(?cli, "Starting yoga cli");

    let history = Arc::new(History::new());
    let ctx = AppContext::new(&cli.client, history.clone(), Arc::new(PrintNotices))?;

    let Cli {
        email,
        password,
        command,
        ..
    } = cli;
    let email = email.ok_or_else(|| anyhow!("--email or YOGA_EMAIL is required"))?;
    let password = password.ok_or_else(|| anyhow!("--password or YOGA_PASSWORD is required"))?;

    let command = match command {
        Command::Register {
            first_name,
            last_name,
        } => return register(ctx, email, password, first_name, last_name).await,
        command => command,
    };

    log_in(&ctx, email, &password).await?;
    let app = App::new(ctx);

    match command {
        Command::Login => {
            let info = app
                .context()
                .user_session
                .session_information()
                .context("identity missing after login")?;
            println!(
                "Logged in as {} {} ({}), id {}{}",
                info.first_name,
                info.last_name,
                info.username,
                info.id,
                if info.admin { ", admin" } else { "" }
            );
        }
        Command::Register { .. } => bail!("register runs without a login"),
        Command::Sessions(command) => sessions(&app, command).await?,
        Command::Teachers => {
            for teacher in app.context().teacher_api.all().await? {
                println!(
                    "{:>4}  {} {}",
                    teacher.id, teacher.first_name, teacher.last_name
                );
            }
        }
        Command::Me(command) => me(&app, command).await?,
    }

    info!(route = ?history.current(), "Done");
    Ok(())
}

async fn log_in(ctx: &AppContext, email: String, password: &SecretString) -> anyhow::Result<()> {
    let mut page = LoginPage::new(ctx.clone());
    page.form.email = email;
    page.form.password = password.expose_secret().to_string();
    if !page.can_submit() {
        bail!("email or password is not valid");
    }
    page.submit().await;
    if let Some(message) = page.error_message() {
        bail!("login failed: {message}");
    }
    Ok(())
}

async fn register(
    ctx: AppContext,
    email: String,
    password: SecretString,
    first_name: String,
    last_name: String,
) -> anyhow::Result<()> {
    let mut page = RegisterPage::new(ctx);
    page.form.first_name = first_name;
    page.form.last_name = last_name;
    page.form.email = email;
    page.form.password = password.expose_secret().to_string();
    if !page.can_submit() {
        bail!("registration fields are not valid");
    }
    page.submit().await;
    if let Some(message) = page.error_message() {
        bail!("register failed: {message}");
    }
    println!("Account created, you can now log in");
    Ok(())
}

async fn sessions(app: &App, command: SessionsCommand) -> anyhow::Result<()> {
    match command {
        SessionsCommand::List => {
            let Page::Sessions(mut list) = app.open(&Route::Sessions.to_string()).1 else {
                bail!("sessions are not reachable");
            };
            list.mount().await;
            if list.on_error {
                bail!("fail to fetch sessions");
            }
            for session in list.sessions() {
                println!(
                    "{:>4}  {}  {}  ({} attendees)",
                    session.id,
                    session.date.format("%B %e, %Y"),
                    session.name,
                    session.users.len()
                );
            }
        }
        SessionsCommand::Show { id } => {
            let detail = open_detail(app, id).await?;
            print_detail(&detail);
        }
        SessionsCommand::Create {
            name,
            date,
            teacher_id,
            description,
        } => {
            let mut page = open_form(app, Route::Create).await?;
            page.form.name = name;
            page.form.date = Some(date);
            page.form.teacher_id = Some(teacher_id);
            page.form.description = description;
            save(&mut page).await?;
        }
        SessionsCommand::Update {
            id,
            name,
            date,
            teacher_id,
            description,
        } => {
            let mut page = open_form(app, Route::Update { id }).await?;
            if let Some(name) = name {
                page.form.name = name;
            }
            if date.is_some() {
                page.form.date = date;
            }
            if teacher_id.is_some() {
                page.form.teacher_id = teacher_id;
            }
            if let Some(description) = description {
                page.form.description = description;
            }
            save(&mut page).await?;
        }
        SessionsCommand::Delete { id } => {
            let mut detail = open_detail(app, id).await?;
            if !detail.affordances().delete {
                bail!("only admins can delete sessions");
            }
            detail.delete().await;
            if detail.on_error {
                bail!("fail to delete session {id}");
            }
        }
        SessionsCommand::Participate { id } => {
            let mut detail = open_detail(app, id).await?;
            if !detail.affordances().participate {
                bail!("participate is not available on session {id}");
            }
            detail.participate().await;
            if detail.on_error {
                bail!("fail to participate in session {id}");
            }
            print_detail(&detail);
        }
        SessionsCommand::Unparticipate { id } => {
            let mut detail = open_detail(app, id).await?;
            if !detail.affordances().un_participate {
                bail!("you are not booked on session {id}");
            }
            detail.un_participate().await;
            if detail.on_error {
                bail!("fail to leave session {id}");
            }
            print_detail(&detail);
        }
    }
    Ok(())
}

async fn open_detail(app: &App, id: SessionId) -> anyhow::Result<SessionDetail> {
    let Page::Detail(mut detail) = app.open(&Route::Detail { id }.to_string()).1 else {
        bail!("session detail is not reachable");
    };
    detail.mount().await;
    if detail.on_error {
        bail!("fail to fetch session {id}");
    }
    Ok(detail)
}

async fn open_form(app: &App, route: Route) -> anyhow::Result<SessionFormPage> {
    let Page::Form(mut page) = app.open(&route.to_string()).1 else {
        bail!("session form is not reachable");
    };
    if !page.mount().await {
        bail!("only admins can create or update sessions");
    }
    if page.on_error {
        bail!("fail to load session form");
    }
    Ok(page)
}

async fn save(page: &mut SessionFormPage) -> anyhow::Result<()> {
    if !page.can_submit() {
        bail!("session fields are not valid");
    }
    page.submit().await;
    if page.on_error {
        bail!("fail to save session");
    }
    Ok(())
}

fn print_detail(detail: &SessionDetail) {
    let Some(session) = detail.session() else {
        return;
    };
    println!("{}", session.name);
    println!("  date: {}", session.date.format("%B %e, %Y"));
    if let Some(teacher) = detail.teacher() {
        println!(
            "  teacher: {} {}",
            teacher.first_name,
            teacher.last_name.to_uppercase()
        );
    }
    println!("  attendees: {}", detail.attendees());
    println!("  {}", session.description);
    let affordances = detail.affordances();
    if affordances.participate {
        println!("  you can participate");
    } else if affordances.un_participate {
        println!("  you are booked");
    }
}

async fn me(app: &App, command: MeCommand) -> anyhow::Result<()> {
    let Page::Me(mut page) = app.open(&Route::Me.to_string()).1 else {
        bail!("account page is not reachable");
    };
    page.mount().await;
    if page.on_error {
        bail!("fail to fetch account");
    }
    match command {
        MeCommand::Show => {
            for label in [page.name_label(), page.email_label()].into_iter().flatten() {
                println!("{label}");
            }
            if let Some(label) = page.admin_label() {
                println!("{label}");
            }
        }
        MeCommand::Delete => {
            if !page.can_delete() {
                bail!("admin accounts cannot be deleted");
            }
            page.delete().await;
            if page.on_error {
                bail!("fail to delete account");
            }
        }
    }
    Ok(())
}
