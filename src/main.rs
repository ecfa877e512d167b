use anyhow::Result;
use colored::*;
use dotenvy::dotenv;
use std::io::{self, BufRead, Write};
use tracing::info;

use fleet_dashboard::config::EnvironmentConfig;
use fleet_dashboard::dashboard::battery::{LowBatteryWarning, Notifier};
use fleet_dashboard::dashboard::state::{DraftField, FormMode};
use fleet_dashboard::models::vehicle::RecordId;
use fleet_dashboard::{Dashboard, SubmitOutcome, VehicleApiClient};

/// Aviso bloqueante: equivalente en terminal de `alert()`
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, warning: &LowBatteryWarning) {
        println!();
        println!("{}", format!("🔋 {}", warning).bright_red().bold());
        // Si stdin falla no hay nadie a quien esperar
        let _ = prompt("Pulsa Enter para continuar...");
    }
}

type TerminalDashboard = Dashboard<VehicleApiClient, TerminalNotifier>;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(io::stderr)
        .init();

    println!("{}", "🚚 Fleet Management System".bright_blue().bold());
    println!("{}", "==========================".bright_blue());
    info!("🌐 Recurso remoto: {}/vehicles", config.api_base_url);

    let client = VehicleApiClient::new(&config)?;
    let mut dashboard = Dashboard::new(client, TerminalNotifier, config.low_battery_threshold);
    dashboard.mount().await;

    match run_menu(&mut dashboard).await {
        // Ctrl-D o stdin cerrado: salir como con la opción 6
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            println!();
            println!("{}", "👋 Entrada cerrada. ¡Hasta luego!".bright_green());
            Ok(())
        }
        result => Ok(result?),
    }
}

async fn run_menu(dashboard: &mut TerminalDashboard) -> io::Result<()> {
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🚗 Ver vehículos");
        println!("2. 📝 {}", dashboard.form().submit_label());
        println!("3. ✏️  Editar vehículo");
        println!("4. ↩️  Cancelar edición");
        println!("5. 🗑️  Eliminar vehículo");
        println!("6. 🚪 Salir");

        let choice = prompt("Selecciona una opción (1-6): ")?;
        match choice.as_str() {
            "1" => print_vehicles(dashboard),
            "2" => fill_and_submit(dashboard).await?,
            "3" => {
                let id = RecordId::parse_input(&prompt("ID del vehículo: ")?);
                if dashboard.begin_edit(&id) {
                    println!("{}", format!("✏️ Editando vehículo {}", id).bright_cyan());
                    fill_and_submit(dashboard).await?;
                }
            }
            "4" => {
                if dashboard.cancel_edit() {
                    println!("{}", "↩️ Edición cancelada".bright_cyan());
                }
            }
            "5" => {
                let id = RecordId::parse_input(&prompt("ID del vehículo: ")?);
                dashboard.delete(&id).await;
            }
            "6" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
            }
        }
    }

    Ok(())
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    read_answer(&mut io::stdin().lock())
}

/// Una línea sin espacios alrededor. Fin de entrada es `UnexpectedEof`.
fn read_answer(reader: &mut impl BufRead) -> io::Result<String> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin cerrado"));
    }
    Ok(input.trim().to_string())
}

fn print_vehicles(dashboard: &TerminalDashboard) {
    println!();
    println!("{}", "Fleet Vehicles".bright_blue().bold());
    let cards = dashboard.cards();
    if cards.is_empty() {
        println!("(sin vehículos)");
        return;
    }
    for card in cards {
        println!();
        if card.low_battery {
            println!("{}", card.title.bright_red().bold());
            for line in &card.lines {
                println!("  {}", line.red());
            }
        } else {
            println!("{}", card.title.bold());
            for line in &card.lines {
                println!("  {}", line);
            }
        }
    }
}

/// Pedir cada campo (Enter conserva el valor actual) y enviar
async fn fill_and_submit(dashboard: &mut TerminalDashboard) -> io::Result<()> {
    if let FormMode::UpdateFailed { id, reason } = &dashboard.form().mode {
        println!(
            "{}",
            format!("⚠️ La última actualización de {} falló ({}). Reintentando.", id, reason).yellow()
        );
    }

    let fields = [
        DraftField::VehicleId,
        DraftField::BatteryPercentage,
        DraftField::TotalDistance,
        DraftField::LastChargeTime,
        DraftField::Status,
    ];

    for field in fields {
        let current = current_value(dashboard, field);
        if field == DraftField::VehicleId && dashboard.form().is_edit_mode() {
            println!("{}: {} (bloqueado)", field.label(), current);
            continue;
        }

        let hint = match field {
            DraftField::LastChargeTime => " [YYYY-MM-DDTHH:MM]",
            DraftField::Status => " [Idle | In Transit | Charging]",
            _ => "",
        };
        loop {
            let input = prompt(&format!("{}{} ({}): ", field.label(), hint, current))?;
            if input.is_empty() {
                break;
            }
            match dashboard.set_field(field, &input) {
                Ok(()) => break,
                Err(e) => println!("{}", format!("❌ {}", e).bright_red()),
            }
        }
    }

    let outcome = dashboard.submit().await;
    match outcome {
        SubmitOutcome::Created(id) => println!("{}", format!("✅ Vehículo creado (id: {})", id).bright_green()),
        SubmitOutcome::Updated(id) => println!("{}", format!("✅ Vehículo actualizado (id: {})", id).bright_green()),
        SubmitOutcome::Invalid(e) => println!("{}", format!("❌ Completa los campos requeridos: {}", e).bright_red()),
        SubmitOutcome::Failed => {}
    }
    Ok(())
}

fn current_value(dashboard: &TerminalDashboard, field: DraftField) -> String {
    let draft = &dashboard.form().draft;
    match field {
        DraftField::VehicleId => draft.vehicle_id.clone(),
        DraftField::BatteryPercentage => draft.battery_percentage.clone(),
        DraftField::TotalDistance => draft.total_distance.clone(),
        DraftField::LastChargeTime => draft.last_charge_time.clone(),
        DraftField::Status => draft.status.to_string(),
        DraftField::ScheduledChargeTime => draft.scheduled_charge_time.clone().unwrap_or_default(),
    }
}
