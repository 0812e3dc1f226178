//! Client, vehicle and service list formatting

use crate::models::{Client, Service, Vehicle};

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.chars().count())
}

/// Format client search results
pub fn format_client_list(clients: &[Client]) -> String {
    if clients.is_empty() {
        return "No clients found.\n".to_string();
    }

    let ids: Vec<String> = clients.iter().map(|c| c.id.to_string()).collect();
    let id_w = column_width("ID", ids.iter().map(String::as_str));
    let name_w = column_width("Name", clients.iter().map(|c| c.name.as_str()));

    let mut output = format!("{:<id_w$}  {:<name_w$}  {}\n", "ID", "Name", "Phone");
    output.push_str(&format!("{:-<id_w$}  {:-<name_w$}  {:-<12}\n", "", "", ""));
    for (client, id) in clients.iter().zip(&ids) {
        output.push_str(&format!(
            "{:<id_w$}  {:<name_w$}  {}\n",
            id,
            client.name,
            client.phone_or_empty()
        ));
    }
    output
}

/// Format vehicle search results with their owners
pub fn format_vehicle_list(vehicles: &[Vehicle]) -> String {
    if vehicles.is_empty() {
        return "No vehicles found.\n".to_string();
    }

    let ids: Vec<String> = vehicles.iter().map(|v| v.id.to_string()).collect();
    let names: Vec<String> = vehicles
        .iter()
        .map(|v| format!("{} {}", v.brand, v.model))
        .collect();
    let id_w = column_width("ID", ids.iter().map(String::as_str));
    let plate_w = column_width("Plate", vehicles.iter().map(|v| v.plate_number.as_str()));
    let name_w = column_width("Vehicle", names.iter().map(String::as_str));

    let mut output = format!(
        "{:<id_w$}  {:<plate_w$}  {:<name_w$}  {}\n",
        "ID", "Plate", "Vehicle", "Owner"
    );
    output.push_str(&format!(
        "{:-<id_w$}  {:-<plate_w$}  {:-<name_w$}  {:-<12}\n",
        "", "", "", ""
    ));
    for ((vehicle, id), name) in vehicles.iter().zip(&ids).zip(&names) {
        let owner = vehicle
            .client
            .as_ref()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "{:<id_w$}  {:<plate_w$}  {:<name_w$}  {}\n",
            id, vehicle.plate_number, name, owner
        ));
    }
    output
}

/// Format the service catalogue; inactive services only when `all` is set
pub fn format_service_list(services: &[Service], all: bool) -> String {
    let shown: Vec<&Service> = services.iter().filter(|s| all || s.is_active).collect();
    if shown.is_empty() {
        return "No services found.\n".to_string();
    }

    let mut output = String::new();
    for service in shown {
        let status = if service.is_active { "" } else { "  (inactive)" };
        output.push_str(&format!(
            "{:>8}  {}{}\n",
            service.id.to_string(),
            service.name,
            status
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientId, ServiceId, VehicleId};

    #[test]
    fn test_client_list() {
        let clients = vec![Client {
            id: ClientId::new(42),
            name: "Анна Петренко".into(),
            phone: Some("0501234567".into()),
        }];
        let output = format_client_list(&clients);
        assert!(output.contains("cl-42"));
        assert!(output.contains("Анна Петренко  0501234567"));
        assert_eq!(format_client_list(&[]), "No clients found.\n");
    }

    #[test]
    fn test_vehicle_list_shows_owner() {
        let vehicles = vec![Vehicle {
            id: VehicleId::new(7),
            plate_number: "AA1234BB".into(),
            brand: "Skoda".into(),
            model: "Octavia".into(),
            client: Some(Client {
                id: ClientId::new(42),
                name: "Anna".into(),
                phone: None,
            }),
        }];
        let output = format_vehicle_list(&vehicles);
        assert!(output.contains("Skoda Octavia"));
        assert!(output.trim_end().ends_with("Anna"));
    }

    #[test]
    fn test_inactive_services_hidden_by_default() {
        let services = vec![
            Service {
                id: ServiceId::new(1),
                name: "Diagnostics".into(),
                is_active: true,
            },
            Service {
                id: ServiceId::new(2),
                name: "Tyre storage".into(),
                is_active: false,
            },
        ];
        assert!(!format_service_list(&services, false).contains("Tyre storage"));
        assert!(format_service_list(&services, true).contains("Tyre storage  (inactive)"));
    }
}
