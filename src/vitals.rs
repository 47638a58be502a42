use crate::models::{AlertStatus, Doctor, VitalsResponse};
use crate::random::RandomSource;

pub const DEVICE_LABEL: &str = "Chair #HC-204";
pub const INITIAL_HEART_RATE: u32 = 72;
pub const SIMULATED_HEART_RATE: (u32, u32) = (65, 85);
pub const HEART_RATE_LOW: u32 = 50;
pub const HEART_RATE_HIGH: u32 = 100;

pub const BLOOD_PRESSURE: &str = "120/80";
pub const GLUCOSE_MG_DL: u32 = 95;
pub const OXYGEN_SATURATION: u32 = 98;

pub const NEARBY_DOCTORS: [Doctor; 3] = [
    Doctor {
        name: "Dr. Sarah Johnson",
        specialty: "Cardiology",
        distance: "2 mins away",
        status: "Available",
    },
    Doctor {
        name: "Dr. Michael Chen",
        specialty: "Emergency Medicine",
        distance: "5 mins away",
        status: "Available",
    },
    Doctor {
        name: "Dr. Emily Davis",
        specialty: "Internal Medicine",
        distance: "3 mins away",
        status: "In Surgery",
    },
];

/// Mock chair link and the heart-rate reading it feeds.
pub struct VitalsMonitor {
    connected: bool,
    heart_rate: u32,
    rng: Box<dyn RandomSource>,
}

impl VitalsMonitor {
    pub fn new(rng: impl RandomSource + 'static) -> Self {
        Self {
            connected: false,
            heart_rate: INITIAL_HEART_RATE,
            rng: Box::new(rng),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn heart_rate(&self) -> u32 {
        self.heart_rate
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    pub fn connect(&mut self) {
        self.set_connected(true);
    }

    pub fn disconnect(&mut self) {
        self.set_connected(false);
    }

    pub fn toggle(&mut self) -> bool {
        self.connected = !self.connected;
        self.connected
    }

    /// Takes a new simulated reading. No-op while disconnected.
    pub fn tick(&mut self) -> bool {
        if !self.connected {
            return false;
        }
        let bpm = self
            .rng
            .in_range(SIMULATED_HEART_RATE.0, SIMULATED_HEART_RATE.1);
        self.record_heart_rate(bpm);
        true
    }

    pub fn record_heart_rate(&mut self, bpm: u32) {
        self.heart_rate = bpm;
    }

    pub fn alert(&self) -> AlertStatus {
        assess_heart_rate(self.heart_rate)
    }

    pub fn snapshot(&self) -> VitalsResponse {
        VitalsResponse {
            connected: self.connected,
            device: self.connected.then_some(DEVICE_LABEL),
            heart_rate: self.heart_rate,
            blood_pressure: BLOOD_PRESSURE,
            glucose: GLUCOSE_MG_DL,
            oxygen_saturation: OXYGEN_SATURATION,
            alert: self.alert(),
        }
    }
}

pub fn is_emergency(bpm: u32) -> bool {
    bpm < HEART_RATE_LOW || bpm > HEART_RATE_HIGH
}

pub fn assess_heart_rate(bpm: u32) -> AlertStatus {
    let message = if bpm < HEART_RATE_LOW {
        Some("Heart rate too low".to_string())
    } else if bpm > HEART_RATE_HIGH {
        Some("Heart rate too high".to_string())
    } else {
        None
    };

    AlertStatus {
        active: message.is_some(),
        heart_rate: bpm,
        message,
        nearby_doctors: if is_emergency(bpm) {
            NEARBY_DOCTORS.to_vec()
        } else {
            Vec::new()
        },
    }
}
