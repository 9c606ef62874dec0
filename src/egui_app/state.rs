use egui::Color32;

/// Severity of the footer message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Playing,
    Warning,
    Error,
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    /// Current verse, e.g. `Surah Al-Fatiha - Ayah 1`.
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
    /// Most recent problem, shown after the verse label.
    pub notice: Option<String>,
}

impl StatusBarState {
    pub fn new(text: String, tone: StatusTone, notice: Option<String>) -> Self {
        let (badge_label, badge_color) = status_badge(tone);
        Self {
            text,
            badge_label,
            badge_color,
            notice,
        }
    }
}

fn status_badge(tone: StatusTone) -> (String, Color32) {
    match tone {
        StatusTone::Idle => ("Paused".into(), Color32::from_rgb(42, 42, 42)),
        StatusTone::Playing => ("Playing".into(), Color32::from_rgb(64, 140, 112)),
        StatusTone::Warning => ("Warning".into(), Color32::from_rgb(192, 138, 43)),
        StatusTone::Error => ("Error".into(), Color32::from_rgb(192, 57, 43)),
    }
}
