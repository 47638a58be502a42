use crate::models::{HistoryResponse, MedicalEvent, Patient};

pub const PATIENT: Patient = Patient {
    name: "John Doe",
    age: 45,
    room: "Room 204",
    condition: "Stable",
};

// newest first
pub const MEDICAL_EVENTS: [MedicalEvent; 5] = [
    MedicalEvent {
        date: "2024-06-10",
        kind: "Checkup",
        description: "Routine cardiovascular examination",
        status: "Normal",
        doctor: "Dr. Sarah Johnson",
    },
    MedicalEvent {
        date: "2024-06-05",
        kind: "Medication",
        description: "Prescribed Lisinopril 10mg daily",
        status: "Active",
        doctor: "Dr. Michael Chen",
    },
    MedicalEvent {
        date: "2024-05-28",
        kind: "Lab Results",
        description: "Blood work - Cholesterol levels",
        status: "Reviewed",
        doctor: "Dr. Sarah Johnson",
    },
    MedicalEvent {
        date: "2024-05-15",
        kind: "Procedure",
        description: "ECG monitoring session",
        status: "Completed",
        doctor: "Dr. Emily Davis",
    },
    MedicalEvent {
        date: "2024-04-20",
        kind: "Consultation",
        description: "Hypertension management review",
        status: "Follow-up",
        doctor: "Dr. Sarah Johnson",
    },
];

pub fn medical_history() -> HistoryResponse {
    HistoryResponse {
        patient: PATIENT,
        events: MEDICAL_EVENTS.to_vec(),
    }
}
