use anyhow::{bail, Result};
use onico_api::endpoints::appointments::Appointment;
use onico_api::endpoints::dashboard::{AdvancedStats, DashboardData};
use onico_api::endpoints::Cents;
use onico_api::{ApiError, Client, Request};
use onico_auth::{Session, Settings};
use secrecy::SecretString;
use std::io::Write;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::cli::Command;

pub struct App {
    session: Arc<Session>,
    _expiry: JoinHandle<()>,
}

impl App {
    pub fn connect(settings: &Settings) -> Result<Self> {
        let client = onico_auth::connect(settings)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Must be called inside a tokio runtime.
    pub fn new(client: Arc<Client>) -> Self {
        let session = Arc::new(Session::new(client));
        let expiry = session.watch_expiry();
        Self {
            session,
            _expiry: expiry,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub async fn run<W: Write>(&self, command: Command, out: &mut W) -> Result<()> {
        tracing::debug!(?command, "Running command");

        match command {
            Command::Login { email, password } => {
                let password = password_or_prompt(password)?;
                let user = self.session.login(email, password).await?;
                writeln!(out, "✓ Logged in as {}", user.full_name())?;
            }
            Command::Register {
                first_name,
                last_name,
                email,
                password,
            } => {
                let password = password_or_prompt(password)?;
                let user = self
                    .session
                    .register(first_name, last_name, email, password)
                    .await?;
                writeln!(out, "✓ Registered {} <{}>", user.full_name(), user.email)?;
            }
            Command::Logout => {
                self.session.logout();
                writeln!(out, "Logged out")?;
            }
            Command::Whoami => {
                self.session.initialize().await;
                match self.session.current_user() {
                    Some(user) => writeln!(out, "{} <{}>", user.full_name(), user.email)?,
                    None => writeln!(out, "Not logged in")?,
                }
            }
            command => {
                if !self.session.is_authenticated() {
                    bail!("Not logged in. Run `onico login <email>` first.");
                }
                self.fetch(command, out).await.map_err(session_hint)?;
            }
        }

        Ok(())
    }

    async fn fetch<W: Write>(&self, command: Command, out: &mut W) -> Result<()> {
        let client = self.session.client();

        match command {
            Command::Clients => {
                let clients = client.send(Request::clients().list()).await?;
                for customer in &clients {
                    let contact = customer
                        .phone
                        .as_deref()
                        .or(customer.email.as_deref())
                        .unwrap_or("-");
                    writeln!(out, "{:<30} {}", customer.full_name(), contact)?;
                }
                writeln!(out, "{} clients", clients.len())?;
            }
            Command::Services => {
                let services = client.send(Request::services().list()).await?;
                for service in services.iter().filter(|s| s.active) {
                    writeln!(
                        out,
                        "{:<30} {:>10} {}",
                        service.name,
                        service.price.to_string(),
                        service.formatted_duration()
                    )?;
                }
            }
            Command::Appointments { date } => {
                let mut request = Request::appointments().list();
                if let Some(date) = date {
                    request = request.date(date);
                }
                let appointments = client.send(request).await?;
                if appointments.is_empty() {
                    writeln!(out, "No appointments")?;
                }
                for appointment in &appointments {
                    writeln!(out, "{}", format_appointment(appointment))?;
                }
            }
            Command::Promotions => {
                let promotions = client.send(Request::promotions().active()).await?;
                for promotion in &promotions {
                    writeln!(
                        out,
                        "{:<30} -{}%",
                        promotion.name, promotion.discount_percent
                    )?;
                }
            }
            Command::Dashboard => {
                let dashboard = client.send(Request::dashboard().summary()).await?;
                for line in format_dashboard(&dashboard) {
                    writeln!(out, "{}", line)?;
                }
            }
            Command::Stats => {
                let stats = client.send(Request::dashboard().stats()).await?;
                for line in format_stats(&stats) {
                    writeln!(out, "{}", line)?;
                }
            }
            Command::InvalidateCache => {
                client.send(Request::system().invalidate_cache()).await?;
                writeln!(out, "✓ Cache invalidated")?;
            }
            command => bail!("{:?} does not fetch data", command),
        }

        Ok(())
    }
}

fn session_hint(err: anyhow::Error) -> anyhow::Error {
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::SessionExpired) => anyhow::anyhow!("Session expired. Please log in again."),
        _ => err,
    }
}

fn password_or_prompt(password: Option<String>) -> Result<SecretString> {
    if let Some(password) = password {
        return Ok(SecretString::from(password));
    }

    print!("Password: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    let password = input.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("Password is required");
    }
    Ok(SecretString::from(password))
}

fn format_appointment(appointment: &Appointment) -> String {
    let client = appointment
        .client
        .as_ref()
        .map(|client| client.full_name())
        .unwrap_or_else(|| "Unknown client".to_string());

    let mut line = format!(
        "{} {:<13} {}",
        appointment.date,
        appointment.time_range(),
        client
    );
    if let Some(price) = appointment.total_price {
        line.push_str(&format!(" {}", price));
    }
    if appointment.is_cancelled() {
        line.push_str(" [cancelled]");
    }
    line
}

fn format_dashboard(dashboard: &DashboardData) -> Vec<String> {
    let mut lines = vec![
        format!("Clients:            {}", dashboard.total_clients),
        format!("New this month:     {}", dashboard.new_clients_this_month),
        format!("Earnings (month):   {}", dashboard.monthly_earnings),
    ];

    if dashboard.next_appointments.is_empty() {
        lines.push("No upcoming appointments".to_string());
    } else {
        lines.push("Upcoming:".to_string());
        lines.extend(
            dashboard
                .next_appointments
                .iter()
                .map(|a| format!("  {}", format_appointment(a))),
        );
    }
    lines
}

/// Amounts in the stats payload are cents carried as floats.
fn cents(value: f64) -> Cents {
    Cents::new(value.round() as i64)
}

fn format_stats(stats: &AdvancedStats) -> Vec<String> {
    if stats.is_empty() {
        return vec!["No statistics available yet".to_string()];
    }

    let mut lines = Vec::new();
    if !stats.top_spenders.is_empty() {
        lines.push("Top spenders:".to_string());
        for spender in &stats.top_spenders {
            lines.push(format!(
                "  {} {} {}",
                spender.first_name,
                spender.last_name,
                cents(spender.total_spend)
            ));
        }
    }
    if !stats.top_services.is_empty() {
        lines.push("Top services:".to_string());
        for service in &stats.top_services {
            lines.push(format!("  {} ({})", service.name, service.usage_count));
        }
    }
    if !stats.monthly_revenue.is_empty() {
        lines.push("Monthly revenue:".to_string());
        for month in &stats.monthly_revenue {
            lines.push(format!("  {} {}", month.month, cents(month.revenue)));
        }
    }
    if !stats.unreliable_clients.is_empty() {
        lines.push("Most cancellations:".to_string());
        for client in &stats.unreliable_clients {
            lines.push(format!(
                "  {} {} ({})",
                client.first_name, client.last_name, client.count
            ));
        }
    }
    lines
}
