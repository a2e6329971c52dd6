//! Display metadata for the label and status codes carried on calendar records.

const UNKNOWN_TEXT: &str = "Unknown";
const UNKNOWN_COLOR: &str = "#000000";

/// Category label attached to a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventLabel {
    None,
    Important,
    Business,
    Personal,
    Vacation,
    MustAttend,
    TravelRequired,
    NeedsPreparation,
    Birthday,
    Anniversary,
    PhoneCall,
}

impl EventLabel {
    #[must_use]
    pub const fn from_value(value: i32) -> Option<Self> {
        Some(match value {
            0 => Self::None,
            1 => Self::Important,
            2 => Self::Business,
            3 => Self::Personal,
            4 => Self::Vacation,
            5 => Self::MustAttend,
            6 => Self::TravelRequired,
            7 => Self::NeedsPreparation,
            8 => Self::Birthday,
            9 => Self::Anniversary,
            10 => Self::PhoneCall,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Important => "Important",
            Self::Business => "Business",
            Self::Personal => "Personal",
            Self::Vacation => "Vacation",
            Self::MustAttend => "Must Attend",
            Self::TravelRequired => "Travel Required",
            Self::NeedsPreparation => "Needs Preparation",
            Self::Birthday => "Birthday",
            Self::Anniversary => "Anniversary",
            Self::PhoneCall => "Phone Call",
        }
    }

    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::None => "#9e9e9e",
            Self::Important => "#ff5722",
            Self::Business => "#2196f3",
            Self::Personal => "#4caf50",
            Self::Vacation => "#ff9800",
            Self::MustAttend => "#8bc34a",
            Self::TravelRequired => "#03a9f4",
            Self::NeedsPreparation => "#3f51b5",
            Self::Birthday => "#9c27b0",
            Self::Anniversary => "#673ab7",
            Self::PhoneCall => "#ffeb3b",
        }
    }
}

impl std::fmt::Display for EventLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// Availability status shown for a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStatus {
    Free,
    WorkingElsewhere,
    Tentative,
    Busy,
    OutOfOffice,
}

impl EventStatus {
    #[must_use]
    pub const fn from_value(value: i32) -> Option<Self> {
        Some(match value {
            0 => Self::Free,
            1 => Self::WorkingElsewhere,
            2 => Self::Tentative,
            3 => Self::Busy,
            4 => Self::OutOfOffice,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::WorkingElsewhere => "Working Elsewhere",
            Self::Tentative => "Tentative",
            Self::Busy => "Busy",
            Self::OutOfOffice => "Out Of Office",
        }
    }

    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Free => "#ffffff",
            Self::WorkingElsewhere => "#9c27b0",
            Self::Tentative => "#4caf50",
            Self::Busy => "#2196f3",
            Self::OutOfOffice => "#ff5722",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// Text for a raw label code, `"Unknown"` when the code is not recognised.
#[must_use]
pub fn label_text(value: i32) -> &'static str {
    EventLabel::from_value(value).map_or(UNKNOWN_TEXT, EventLabel::text)
}

#[must_use]
pub fn label_color(value: i32) -> &'static str {
    EventLabel::from_value(value).map_or(UNKNOWN_COLOR, EventLabel::color)
}

/// Text for a raw status code, `"Unknown"` when the code is not recognised.
#[must_use]
pub fn status_text(value: i32) -> &'static str {
    EventStatus::from_value(value).map_or(UNKNOWN_TEXT, EventStatus::text)
}

#[must_use]
pub fn status_color(value: i32) -> &'static str {
    EventStatus::from_value(value).map_or(UNKNOWN_COLOR, EventStatus::color)
}
