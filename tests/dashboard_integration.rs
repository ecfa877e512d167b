use fleet_dashboard::config::EnvironmentConfig;
use fleet_dashboard::dashboard::battery::RecordingNotifier;
use fleet_dashboard::dashboard::state::{DraftField, FormMode};
use fleet_dashboard::models::vehicle::{RecordId, VehicleStatus};
use fleet_dashboard::repositories::CollectionRepository;
use fleet_dashboard::routes::create_app;
use fleet_dashboard::state::AppState;
use fleet_dashboard::{Dashboard, SubmitOutcome, VehicleApi, VehicleApiClient};
use serde_json::json;

// Levantar el servidor mock en un puerto libre y devolver su URL base
async fn spawn_mock_server(repository: CollectionRepository) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_app(AppState::new(EnvironmentConfig::default(), repository));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn client_for(base_url: &str) -> VehicleApiClient {
    let config = EnvironmentConfig {
        api_base_url: base_url.to_string(),
        request_timeout_secs: 5,
        ..EnvironmentConfig::default()
    };
    VehicleApiClient::new(&config).unwrap()
}

fn seeded_repository() -> CollectionRepository {
    CollectionRepository::from_document(json!({
        "vehicles": [
            {
                "id": 1,
                "vehicleId": "EV-01",
                "batteryPercentage": 8,
                "totalDistance": 5400,
                "lastChargeTime": "2024-05-01T07:00",
                "status": "Charging",
                "scheduledChargeTime": null
            },
            {
                "id": 2,
                "vehicleId": "EV-02",
                "batteryPercentage": "76",
                "totalDistance": "1200",
                "lastChargeTime": "2024-05-01T09:15",
                "status": "In Transit",
                "scheduledChargeTime": null
            }
        ]
    }))
    .unwrap()
}

#[tokio::test]
async fn test_full_dashboard_cycle_against_mock_server() {
    let base_url = spawn_mock_server(seeded_repository()).await;
    let mut dashboard = Dashboard::new(client_for(&base_url), RecordingNotifier::default(), 15.0);

    // Carga inicial
    dashboard.mount().await;
    assert_eq!(dashboard.vehicles().len(), 2);
    assert_eq!(dashboard.notifier().warnings.len(), 1);
    assert_eq!(dashboard.notifier().warnings[0].count, 1);

    // Crear
    dashboard.set_field(DraftField::VehicleId, "EV-03").unwrap();
    dashboard.set_field(DraftField::BatteryPercentage, "5").unwrap();
    dashboard.set_field(DraftField::TotalDistance, "42").unwrap();
    dashboard.set_field(DraftField::LastChargeTime, "2024-05-02T10:00").unwrap();
    let outcome = dashboard.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Created(RecordId::Number(3))));
    assert_eq!(dashboard.vehicles().len(), 3);
    assert_eq!(dashboard.notifier().warnings.last().unwrap().count, 2);

    // Editar y actualizar
    assert!(dashboard.begin_edit(&RecordId::Number(1)));
    assert_eq!(dashboard.form().draft.vehicle_id, "EV-01");
    dashboard.set_field(DraftField::BatteryPercentage, "95").unwrap();
    dashboard.set_field(DraftField::Status, "Idle").unwrap();
    let outcome = dashboard.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Updated(RecordId::Number(1))));
    assert_eq!(dashboard.vehicles().len(), 3);
    let updated = &dashboard.vehicles()[0];
    assert_eq!(updated.battery_percentage, Some(95.0));
    assert_eq!(updated.status, VehicleStatus::Idle);
    // La edición también vuelve a evaluar la batería: solo queda EV-03
    assert_eq!(dashboard.notifier().warnings.len(), 3);
    assert_eq!(dashboard.notifier().warnings[2].count, 1);

    // Eliminar
    assert!(dashboard.delete(&RecordId::Number(2)).await);
    assert_eq!(dashboard.vehicles().len(), 2);
    assert_eq!(dashboard.notifier().warnings.len(), 4);
    assert_eq!(dashboard.notifier().warnings[3].count, 1);

    // El servidor coincide con el estado local
    let remote = dashboard.api().list_vehicles().await.unwrap();
    assert_eq!(remote, dashboard.vehicles());
}

#[tokio::test]
async fn test_update_of_vanished_record_enters_update_failed() {
    let base_url = spawn_mock_server(seeded_repository()).await;
    let mut dashboard = Dashboard::new(client_for(&base_url), RecordingNotifier::default(), 15.0);
    dashboard.mount().await;

    // Otro cliente borra el registro mientras se edita
    client_for(&base_url).delete_vehicle(&RecordId::Number(2)).await.unwrap();

    let warnings_before = dashboard.notifier().warnings.len();
    dashboard.begin_edit(&RecordId::Number(2));
    dashboard.set_field(DraftField::BatteryPercentage, "3").unwrap();
    let outcome = dashboard.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Failed));
    assert_eq!(dashboard.vehicles().len(), 2);
    assert_eq!(dashboard.notifier().warnings.len(), warnings_before);
    assert_eq!(dashboard.form().current_edit_id(), Some(&RecordId::Number(2)));
    match &dashboard.form().mode {
        FormMode::UpdateFailed { reason, .. } => assert!(reason.contains("404")),
        other => panic!("unexpected form mode: {other:?}"),
    }

    assert!(dashboard.cancel_edit());
    assert!(!dashboard.form().is_edit_mode());
}

#[tokio::test]
async fn test_loose_records_are_rendered_not_dropped() {
    let repository = CollectionRepository::from_document(json!({
        "vehicles": [
            {"id": 1, "vehicleId": "EV-1", "batteryPercentage": 5, "lastChargeTime": "2024-05-01T07:00", "status": "Idle"},
            {"id": 2, "vehicleId": "EV-2", "batteryPercentage": 80, "lastChargeTime": "2024-05-01T07:00", "status": "Charging"},
            {"id": 3, "vehicleId": 303, "batteryPercentage": 60, "lastChargeTime": null, "status": "Maintenance"},
            {"id": "depot/7", "vehicleId": "EV-7", "batteryPercentage": "40"},
            {"vehicleId": "sin-id", "batteryPercentage": 1}
        ]
    }))
    .unwrap();
    let base_url = spawn_mock_server(repository).await;
    let mut dashboard = Dashboard::new(client_for(&base_url), RecordingNotifier::default(), 15.0);

    dashboard.mount().await;

    // Solo se omite el registro sin id
    assert_eq!(dashboard.vehicles().len(), 4);
    assert_eq!(dashboard.notifier().warnings.len(), 1);
    assert_eq!(dashboard.notifier().warnings[0].count, 1);

    let loose = &dashboard.vehicles()[2];
    assert_eq!(loose.vehicle_id, "303");
    assert_eq!(loose.last_charge_time, "");
    assert_eq!(loose.status.to_string(), "Maintenance");
    let cards = dashboard.cards();
    assert!(cards[2].lines.iter().any(|line| line == "Status: Maintenance"));

    // Un id con '/' se direcciona como un único segmento
    assert!(dashboard.delete(&RecordId::from("depot/7")).await);
    assert_eq!(dashboard.vehicles().len(), 3);
    let remote = dashboard.api().list_vehicles().await.unwrap();
    assert_eq!(remote, dashboard.vehicles());
}

#[tokio::test]
async fn test_unreachable_server_leaves_dashboard_empty() {
    // Puerto reservado y liberado: nadie escucha
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut dashboard = Dashboard::new(
        client_for(&format!("http://{}", addr)),
        RecordingNotifier::default(),
        15.0,
    );
    dashboard.mount().await;

    assert!(dashboard.vehicles().is_empty());
    assert!(dashboard.notifier().warnings.is_empty());
    assert!(!dashboard.delete(&RecordId::Number(1)).await);
}
