use serde::{Deserialize, Serialize};

/// The kind of an event in the log.
///
/// This is a closed set: records carrying any other `type` string are
/// scanned but never surfaced to a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A published flight schedule.
    FlightSchedule,
    /// A passenger check-in.
    PassengerCheckin,
}

impl EventKind {
    /// All recognized kinds, in wire order.
    pub const ALL: [EventKind; 2] = [EventKind::FlightSchedule, EventKind::PassengerCheckin];

    /// Parses a wire `type` string, returning `None` for unrecognized kinds.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "flight_schedule" => Some(EventKind::FlightSchedule),
            "passenger_checkin" => Some(EventKind::PassengerCheckin),
            _ => None,
        }
    }

    /// Returns the wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::FlightSchedule => "flight_schedule",
            EventKind::PassengerCheckin => "passenger_checkin",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A decoded log record: a typed kind wrapping an opaque payload.
///
/// The wire format is a UTF-8 JSON object with a string `type` field and a
/// `payload` field of arbitrary structure. The payload is passed through
/// unexamined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: EventKind,

    /// Opaque event body. Missing on the wire decodes as JSON `null`.
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl Envelope {
    /// Creates an envelope from a kind and payload.
    pub fn new(kind: EventKind, payload: serde_json::Value) -> Self {
        Self { kind, payload }
    }
}
