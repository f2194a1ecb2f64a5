use std::process::ExitCode;

use anyhow::Result;
use api::{
    handler::{
        admin::AdminView,
        auth::AuthView,
        reservation::{MyReservationsView, ReservationDetailView},
        space::{SpaceCatalogView, SpaceDetailView},
    },
    model::{
        admin::{CreateSpaceForm, PricingRuleForm, StatusForm, UpdateSpaceForm},
        auth::{
            ActivateAccountForm, ChangePasswordForm, EmailForm, LoginForm, ProfileForm,
            RegisterForm, ResetPasswordForm,
        },
        notice::{Notice, Severity},
        reservation::ReservationEditForm,
        space::{BookingForm, SpaceFilterForm},
    },
};
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use kernel::model::{
    calendar::CalendarEntry,
    id::{PricingRuleId, ReservationId, ReservationStatusId, SpaceId, SpaceStatusId, SpaceTypeId},
    reservation::Reservation,
    selection::DateEntry,
    slot::{format_clock_time, parse_clock_time},
    space::Space,
};
use registry::AppRegistry;
use rust_decimal::Decimal;
use shared::config::AppConfig;
use shared::env::{which, Environment};
use shared::error::AppError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "app")]
#[command(about = "Book meeting spaces from the terminal")]
#[command(
    after_help = "Environment:\n  API_URL       Reservation backend\n  SESSION_DIR   Where the sign-in is kept\n  RUST_LOG      Log filter"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "RESERVATION_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    Whoami,
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long, env = "RESERVATION_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        password_confirmation: String,
    },
    /// Activate a new account with the code from the activation mail.
    Activate {
        #[arg(long)]
        token: String,
        #[arg(long)]
        code: String,
    },
    ChangePassword {
        #[arg(long, env = "RESERVATION_PASSWORD", hide_env_values = true)]
        current_password: String,
        #[arg(long)]
        new_password: String,
        #[arg(long)]
        new_password_confirmation: String,
    },
    /// Ask for a password reset mail.
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    ResetPassword {
        #[arg(long)]
        token: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        password_confirmation: String,
    },
    /// Change the name, email or phone of the signed-in account.
    UpdateProfile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Tell whether an email address is still free for registration.
    CheckEmail { email: String },
    /// List bookable spaces.
    Spaces {
        #[arg(long)]
        capacity: Option<i32>,
        #[arg(long)]
        space_type: Option<SpaceTypeId>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Show a space with its price and the calendar of the current month.
    Space { space_id: SpaceId },
    /// Show which half hours are still free for a day or a range of days.
    Availability {
        space_id: SpaceId,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        until: Option<NaiveDate>,
    },
    /// Book a space, one reservation per day of the range.
    Book {
        space_id: SpaceId,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        until: Option<NaiveDate>,
        #[arg(long, value_parser = clock_time)]
        start: NaiveTime,
        #[arg(long, value_parser = clock_time)]
        end: NaiveTime,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Reservations {
        #[arg(long)]
        status: Option<String>,
    },
    Reservation { reservation_id: ReservationId },
    UpdateReservation {
        reservation_id: ReservationId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, value_parser = clock_time)]
        start: Option<NaiveTime>,
        #[arg(long, value_parser = clock_time)]
        end: Option<NaiveTime>,
    },
    Cancel { reservation_id: ReservationId },
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand)]
enum AdminCommand {
    Spaces,
    CreateSpace {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        capacity: i32,
        #[arg(long)]
        space_type: SpaceTypeId,
        #[arg(long)]
        status: Option<SpaceStatusId>,
        #[arg(long)]
        pricing_rule: PricingRuleId,
        #[arg(long, default_value_t = false)]
        inactive: bool,
    },
    UpdateSpace {
        space_id: SpaceId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        capacity: Option<i32>,
        #[arg(long)]
        space_type: Option<SpaceTypeId>,
        #[arg(long)]
        status: Option<SpaceStatusId>,
        #[arg(long)]
        pricing_rule: Option<PricingRuleId>,
        #[arg(long)]
        active: Option<bool>,
    },
    DeleteSpace { space_id: SpaceId },
    PricingRules,
    CreatePricingRule {
        #[arg(long)]
        name: String,
        #[arg(long)]
        hourly_rate: Decimal,
        #[arg(long)]
        description: Option<String>,
    },
    UpdatePricingRule {
        pricing_rule_id: PricingRuleId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        hourly_rate: Decimal,
        #[arg(long)]
        description: Option<String>,
    },
    DeletePricingRule { pricing_rule_id: PricingRuleId },
    Statuses,
    CreateStatus {
        #[arg(long)]
        name: String,
    },
    DeleteStatus { status_id: ReservationStatusId },
    Reservations,
    /// Every live reservation in the month containing `day`.
    Calendar { day: NaiveDate },
}

fn clock_time(raw: &str) -> Result<NaiveTime, AppError> {
    parse_clock_time(raw)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logger() {
        eprintln!("could not set up logging: {e}");
    }
    match bootstrap(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<AppError>() {
                Some(app_error) => {
                    tracing::debug!(error.cause_chain = ?e, "command failed");
                    print_notice(&Notice::from(app_error));
                }
                None => {
                    tracing::error!(error.cause_chain = ?e, error.message = %e, "Unexpected error");
                    eprintln!("error: {e:#}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logger() -> Result<()> {
    let log_level = match which() {
        Environment::Development => "debug",
        Environment::Production => "info",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());

    let subscriber = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(subscriber)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

async fn bootstrap(cli: Cli) -> Result<()> {
    let app_config = AppConfig::new()?;
    let registry = AppRegistry::new(&app_config).await?;
    run(registry, cli.command).await
}

async fn run(registry: AppRegistry, command: Command) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let user = AuthView::new(registry)
                .login(LoginForm { email, password })
                .await?;
            print_notice(&Notice::success("Signed in", format!("Welcome, {}.", user.name)));
        }
        Command::Logout => {
            AuthView::new(registry).logout().await?;
            print_notice(&Notice::info("Signed out", "See you soon."));
        }
        Command::Whoami => {
            let user = AuthView::new(registry).current_user().await?;
            println!("{} <{}> ({})", user.name, user.email, user.role.as_ref());
        }
        Command::Register {
            name,
            email,
            phone,
            password,
            password_confirmation,
        } => {
            let user = AuthView::new(registry)
                .register(RegisterForm {
                    name,
                    email,
                    phone,
                    password,
                    password_confirmation,
                })
                .await?;
            print_notice(&Notice::success(
                "Account created",
                format!("{} can now sign in.", user.email),
            ));
        }
        Command::Activate { token, code } => {
            AuthView::new(registry)
                .activate(ActivateAccountForm {
                    token,
                    activation_code: code,
                })
                .await?;
            print_notice(&Notice::success("Account activated", "You can sign in now."));
        }
        Command::ChangePassword {
            current_password,
            new_password,
            new_password_confirmation,
        } => {
            AuthView::new(registry)
                .change_password(ChangePasswordForm {
                    current_password,
                    new_password,
                    new_password_confirmation,
                })
                .await?;
            print_notice(&Notice::success("Password changed", "Use the new password from now on."));
        }
        Command::ForgotPassword { email } => {
            AuthView::new(registry)
                .forgot_password(EmailForm { email })
                .await?;
            print_notice(&Notice::info(
                "Mail sent",
                "Follow the instructions in the mail to choose a new password.",
            ));
        }
        Command::ResetPassword {
            token,
            password,
            password_confirmation,
        } => {
            AuthView::new(registry)
                .reset_password(ResetPasswordForm {
                    token,
                    password,
                    password_confirmation,
                })
                .await?;
            print_notice(&Notice::success("Password reset", "You can sign in now."));
        }
        Command::UpdateProfile { name, email, phone } => {
            let user = AuthView::new(registry)
                .update_profile(ProfileForm { name, email, phone })
                .await?;
            print_notice(&Notice::success(
                "Profile updated",
                format!("{} <{}>", user.name, user.email),
            ));
        }
        Command::CheckEmail { email } => {
            let available = AuthView::new(registry)
                .check_email(EmailForm {
                    email: email.clone(),
                })
                .await?;
            let state = if available { "available" } else { "already registered" };
            println!("{email}: {state}");
        }
        Command::Spaces {
            capacity,
            space_type,
            date,
            page,
            per_page,
        } => {
            let spaces = SpaceCatalogView::new(registry)
                .search(SpaceFilterForm {
                    capacity,
                    space_type_id: space_type,
                    desired_date: date,
                    page,
                    per_page,
                })
                .await?;
            if spaces.is_empty() {
                print_notice(&Notice::info("No spaces", "Nothing matches these filters."));
            }
            for space in &spaces {
                print_space(space);
            }
        }
        Command::Space { space_id } => {
            let mut view = SpaceDetailView::load(registry, space_id).await?;
            print_space(view.space());
            println!("rate: {} / hour", view.hourly_rate());
            if let Err(e) = view.fetch_month_availability().await {
                print_notice(&Notice::from(&e));
            }
            print_entries(&view.calendar_entries().await);
        }
        Command::Availability {
            space_id,
            date,
            until,
        } => {
            let mut view = SpaceDetailView::load(registry, space_id).await?;
            select_days(&mut view, date, until).await?;
            for option in view.time_slots() {
                let state = if option.occupied { "taken" } else { "free" };
                println!("{}  {state}", format_clock_time(option.time));
            }
        }
        Command::Book {
            space_id,
            date,
            until,
            start,
            end,
            name,
            description,
        } => {
            let mut view = SpaceDetailView::load(registry, space_id).await?;
            select_days(&mut view, date, until).await?;
            view.select_times(start, end)?;
            if let Some(total) = view.total_price() {
                println!("total: {total}");
            }
            let confirmation = view
                .reserve(BookingForm {
                    event_name: name,
                    event_description: description,
                })
                .await?;
            print_notice(&Notice::success(
                "Reservation confirmed",
                format!(
                    "{} day(s) booked, {} in total.",
                    confirmation.reservations.len(),
                    confirmation.total
                ),
            ));
            for reservation in &confirmation.reservations {
                print_reservation(reservation);
            }
        }
        Command::Reservations { status } => {
            let mut view = MyReservationsView::new(registry);
            let reservations = view.load(status).await?.to_vec();
            if reservations.is_empty() {
                print_notice(&Notice::info("No reservations", "You have not booked anything yet."));
            }
            for reservation in &reservations {
                print_reservation(reservation);
                if view.can_change(reservation) {
                    println!("    can be changed or cancelled");
                }
            }
        }
        Command::Reservation { reservation_id } => {
            let view = ReservationDetailView::open(registry, reservation_id).await?;
            print_reservation(view.reservation());
            if let Some(description) = &view.reservation().event_description {
                println!("    {description}");
            }
            println!("    price: {}", view.reservation().event_price);
        }
        Command::UpdateReservation {
            reservation_id,
            name,
            date,
            start,
            end,
        } => {
            let mut view = ReservationDetailView::open(registry, reservation_id).await?;
            let mut form = ReservationEditForm::from_reservation(view.reservation());
            if let Some(name) = name {
                form.event_name = name;
            }
            if let Some(date) = date {
                form.event_date = date;
            }
            if let Some(start) = start {
                form.start_time = start;
            }
            if let Some(end) = end {
                form.end_time = end;
            }
            let updated = view.save(form).await?;
            print_notice(&Notice::success("Reservation updated", ""));
            print_reservation(updated);
        }
        Command::Cancel { reservation_id } => {
            let mut view = ReservationDetailView::open(registry, reservation_id).await?;
            view.cancel().await?;
            print_notice(&Notice::success("Reservation cancelled", ""));
        }
        Command::Admin { command } => run_admin(AdminView::open(registry).await?, command).await?,
    }
    Ok(())
}

async fn run_admin(admin: AdminView, command: AdminCommand) -> Result<()> {
    match command {
        AdminCommand::Spaces => {
            for space in &admin.spaces().await? {
                print_space(space);
            }
        }
        AdminCommand::CreateSpace {
            name,
            description,
            capacity,
            space_type,
            status,
            pricing_rule,
            inactive,
        } => {
            let space = admin
                .create_space(CreateSpaceForm {
                    name,
                    description,
                    capacity,
                    space_type_id: space_type,
                    status_id: status,
                    pricing_rule_id: pricing_rule,
                    is_active: !inactive,
                })
                .await?;
            print_space(&space);
        }
        AdminCommand::UpdateSpace {
            space_id,
            name,
            description,
            capacity,
            space_type,
            status,
            pricing_rule,
            active,
        } => {
            let space = admin
                .update_space(
                    space_id,
                    UpdateSpaceForm {
                        name,
                        description,
                        capacity,
                        space_type_id: space_type,
                        status_id: status,
                        pricing_rule_id: pricing_rule,
                        is_active: active,
                    },
                )
                .await?;
            print_space(&space);
        }
        AdminCommand::DeleteSpace { space_id } => {
            admin.delete_space(space_id).await?;
            print_notice(&Notice::success("Space deleted", space_id.to_string()));
        }
        AdminCommand::PricingRules => {
            for rule in admin.pricing_rules().await? {
                println!("{}  {}  {} / hour", rule.id, rule.name, rule.hourly_rate);
            }
        }
        AdminCommand::CreatePricingRule {
            name,
            hourly_rate,
            description,
        } => {
            let rule = admin
                .create_pricing_rule(PricingRuleForm {
                    name,
                    hourly_rate,
                    description,
                })
                .await?;
            println!("{}  {}  {} / hour", rule.id, rule.name, rule.hourly_rate);
        }
        AdminCommand::UpdatePricingRule {
            pricing_rule_id,
            name,
            hourly_rate,
            description,
        } => {
            let rule = admin
                .update_pricing_rule(
                    pricing_rule_id,
                    PricingRuleForm {
                        name,
                        hourly_rate,
                        description,
                    },
                )
                .await?;
            println!("{}  {}  {} / hour", rule.id, rule.name, rule.hourly_rate);
        }
        AdminCommand::DeletePricingRule { pricing_rule_id } => {
            admin.delete_pricing_rule(pricing_rule_id).await?;
            print_notice(&Notice::success("Pricing rule deleted", pricing_rule_id.to_string()));
        }
        AdminCommand::Statuses => {
            for status in admin.statuses().await? {
                println!("{}  {}", status.id, status.name);
            }
        }
        AdminCommand::CreateStatus { name } => {
            let status = admin.create_status(StatusForm { name }).await?;
            println!("{}  {}", status.id, status.name);
        }
        AdminCommand::DeleteStatus { status_id } => {
            admin.delete_status(status_id).await?;
            print_notice(&Notice::success("Status deleted", status_id.to_string()));
        }
        AdminCommand::Reservations => {
            for reservation in &admin.reservations().await? {
                print_reservation(reservation);
            }
        }
        AdminCommand::Calendar { day } => print_entries(&admin.calendar(day).await?),
    }
    Ok(())
}

/// Picks `date`, or the range `date..=until`.
async fn select_days(
    view: &mut SpaceDetailView,
    date: NaiveDate,
    until: Option<NaiveDate>,
) -> Result<()> {
    if view.select_range(date, until).await? == DateEntry::ClampedToToday {
        print_notice(&Notice::warning(
            "Date adjusted",
            "Past dates cannot be booked; today was used instead.",
        ));
    }
    Ok(())
}

fn print_notice(notice: &Notice) {
    let line = if notice.detail.is_empty() {
        format!("[{}] {}", notice.severity, notice.summary)
    } else {
        format!("[{}] {}: {}", notice.severity, notice.summary, notice.detail)
    };
    if notice.severity == Severity::Error {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
    if notice.requires_login {
        eprintln!("run `app login --email <EMAIL>` to sign in");
    }
}

fn print_space(space: &Space) {
    let kind = space
        .space_type
        .as_ref()
        .map_or("-", |space_type| space_type.name.as_str());
    let state = if space.is_active { "" } else { "  (inactive)" };
    println!(
        "{}  {}  {kind}  capacity {}{state}",
        space.id, space.name, space.capacity
    );
}

fn print_reservation(reservation: &Reservation) {
    let status = reservation
        .status
        .as_ref()
        .map_or("-", |status| status.name.as_str());
    println!(
        "{}  {} {}-{}  {}  [{status}]",
        reservation.id,
        reservation.event_date,
        format_clock_time(reservation.start_time),
        format_clock_time(reservation.end_time),
        reservation.event_name,
    );
}

fn print_entries(entries: &[CalendarEntry]) {
    for entry in entries {
        println!("{}  {}", entry.start.date(), entry.title);
    }
}
