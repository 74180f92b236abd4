//! Demo data served when no database is configured.
//!
//! The set is fixed so screenshots and walkthroughs are reproducible:
//! two clients, three crew members, and two bookings in December 2024.

use crate::entities::{
    Checklist, ChecklistItem, ClientModel, CrewIds, CrewMemberModel, BookingModel,
};
use chrono::{DateTime, NaiveDate, Utc};

/// Id of the demo client "Sari Wulandari".
pub const CLIENT_SARI: &str = "5f0c7a2e-1b7d-4c1e-9a53-2f6f1d0a9e11";
/// Id of the demo client "PT Cahaya Abadi".
pub const CLIENT_CAHAYA: &str = "8a1d3b4c-6e2f-4a7b-8c9d-0e1f2a3b4c22";
/// Id of the demo wedding booking.
pub const BOOKING_WEDDING: &str = "c3a9f2d1-7b4e-4f60-a1b2-c3d4e5f60a33";
/// Id of the demo corporate booking.
pub const BOOKING_GALA: &str = "d4b0e3f2-8c5f-4071-b2c3-d4e5f6071b44";

const CREW_ADI: &str = "1e2d3c4b-5a69-4788-9a0b-1c2d3e4f5a55";
const CREW_RINA: &str = "2f3e4d5c-6b7a-4899-ab1c-2d3e4f5a6b66";
const CREW_YOGA: &str = "3a4f5e6d-7c8b-49aa-bc2d-3e4f5a6b7c77";

fn fixed_instant(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or_default()
}

fn fixed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Demo clients, ordered by name.
#[must_use]
pub fn clients() -> Vec<ClientModel> {
    vec![
        ClientModel {
            id: CLIENT_CAHAYA.to_string(),
            name: "PT Cahaya Abadi".to_string(),
            company: Some("PT Cahaya Abadi".to_string()),
            contact_email: Some("events@cahaya.example".to_string()),
            contact_phone: Some("+62 21 555 0101".to_string()),
            notes: None,
            created_at: fixed_instant(1_701_388_800),
        },
        ClientModel {
            id: CLIENT_SARI.to_string(),
            name: "Sari Wulandari".to_string(),
            company: None,
            contact_email: Some("sari@mail.example".to_string()),
            contact_phone: Some("081234567890".to_string()),
            notes: Some("Prefers WhatsApp".to_string()),
            created_at: fixed_instant(1_701_302_400),
        },
    ]
}

/// Demo crew, ordered by name.
#[must_use]
pub fn crew() -> Vec<CrewMemberModel> {
    vec![
        CrewMemberModel {
            id: CREW_ADI.to_string(),
            name: "Adi Nugroho".to_string(),
            role: "Sound engineer".to_string(),
            status: "Available".to_string(),
            created_at: fixed_instant(1_701_302_400),
        },
        CrewMemberModel {
            id: CREW_RINA.to_string(),
            name: "Rina Pratiwi".to_string(),
            role: "Lighting".to_string(),
            status: "OnDuty".to_string(),
            created_at: fixed_instant(1_701_302_400),
        },
        CrewMemberModel {
            id: CREW_YOGA.to_string(),
            name: "Yoga Saputra".to_string(),
            role: "Rigger".to_string(),
            status: "OnLeave".to_string(),
            created_at: fixed_instant(1_701_302_400),
        },
    ]
}

/// Demo bookings, in insertion order.
#[must_use]
pub fn bookings() -> Vec<BookingModel> {
    vec![
        BookingModel {
            id: BOOKING_WEDDING.to_string(),
            client_id: CLIENT_SARI.to_string(),
            client_name: "Sari Wulandari".to_string(),
            location: "Hotel Savoy Homann, Bandung".to_string(),
            event_date: fixed_date(2024, 12, 14),
            event_type: "Wedding".to_string(),
            status: "Confirmed".to_string(),
            payment_status: "DownPayment".to_string(),
            technical_needs: Checklist(vec![
                ChecklistItem {
                    description: "Line array speakers (2x)".to_string(),
                    completed: true,
                },
                ChecklistItem::open("Wireless microphones (4x)"),
            ]),
            crew_tasks: Checklist(vec![ChecklistItem::open("Sound check by 15:00")]),
            assigned_crew: CrewIds(vec![CREW_ADI.to_string(), CREW_RINA.to_string()]),
            total_amount: Some(5_000_000),
            amount_paid: Some(2_000_000),
            created_at: fixed_instant(1_701_475_200),
            updated_at: fixed_instant(1_701_475_200),
        },
        BookingModel {
            id: BOOKING_GALA.to_string(),
            client_id: CLIENT_CAHAYA.to_string(),
            client_name: "PT Cahaya Abadi".to_string(),
            location: "Balai Kartini, Jakarta".to_string(),
            event_date: fixed_date(2024, 12, 20),
            event_type: "Corporate gala".to_string(),
            status: "Draft".to_string(),
            payment_status: "Unpaid".to_string(),
            technical_needs: Checklist::default(),
            crew_tasks: Checklist::default(),
            assigned_crew: CrewIds::default(),
            total_amount: Some(12_500_000),
            amount_paid: None,
            created_at: fixed_instant(1_701_561_600),
            updated_at: fixed_instant(1_701_561_600),
        },
    ]
}
