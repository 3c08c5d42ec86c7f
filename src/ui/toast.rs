//! Non-blocking notifications in the bottom-right corner.
//!
//! A toast may carry a [`ToastAction`]; clicking its button dismisses the
//! toast and hands the action back to the caller of [`ToastManager::render`].

use std::path::PathBuf;
use std::time::{Duration, Instant};

use egui::{Color32, Context, Pos2, RichText};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastLevel::Success => egui_phosphor::regular::CHECK_CIRCLE,
            ToastLevel::Info => egui_phosphor::regular::INFO,
            ToastLevel::Warning => egui_phosphor::regular::WARNING,
            ToastLevel::Error => egui_phosphor::regular::X_CIRCLE,
        }
    }

    pub fn background_color(&self) -> Color32 {
        match self {
            ToastLevel::Success => Color32::from_rgb(30, 70, 40),
            ToastLevel::Info => Color32::from_rgb(30, 50, 80),
            ToastLevel::Warning => Color32::from_rgb(80, 60, 20),
            ToastLevel::Error => Color32::from_rgb(80, 30, 30),
        }
    }

    pub fn text_color(&self) -> Color32 {
        match self {
            ToastLevel::Success => Color32::from_rgb(100, 220, 120),
            ToastLevel::Info => Color32::from_rgb(100, 180, 255),
            ToastLevel::Warning => Color32::from_rgb(255, 200, 80),
            ToastLevel::Error => Color32::from_rgb(255, 120, 120),
        }
    }
}

/// Follow-up the user can trigger from a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastAction {
    /// Load the project snapshot at this path again.
    RetryLoad(PathBuf),
}

impl ToastAction {
    pub fn label(&self) -> &'static str {
        match self {
            ToastAction::RetryLoad(_) => "Retry",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub action: Option<ToastAction>,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            action: None,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Error).with_duration(Duration::from_secs(6))
    }

    /// Attach an action. Actionable toasts stay up long enough to be clicked.
    pub fn with_action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self.duration = self.duration.max(Duration::from_secs(12));
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// Fades out over the last half second.
    pub fn opacity(&self) -> f32 {
        let elapsed = self.created_at.elapsed();
        let fade_start = self.duration.saturating_sub(Duration::from_millis(500));

        if elapsed >= self.duration {
            0.0
        } else if elapsed >= fade_start {
            ((self.duration - elapsed).as_secs_f32() / 0.5).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.add(Toast::success(message));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.add(Toast::warning(message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.add(Toast::error(message));
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn cleanup(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    /// Draw active toasts. Returns the action whose button was clicked, if any.
    pub fn render(&mut self, ctx: &Context) -> Option<ToastAction> {
        self.cleanup();
        if self.toasts.is_empty() {
            return None;
        }
        ctx.request_repaint();

        let screen_rect = ctx.screen_rect();
        let toast_width = 320.0;
        let toast_height = 40.0;
        let margin = 10.0;
        let spacing = 5.0;
        let mut clicked: Option<usize> = None;

        for (i, toast) in self.toasts.iter().enumerate() {
            let opacity = toast.opacity();
            if opacity <= 0.0 {
                continue;
            }

            let y_offset = (i as f32) * (toast_height + spacing);
            let pos = Pos2::new(
                screen_rect.right() - toast_width - margin,
                screen_rect.bottom() - toast_height - margin - y_offset - 30.0, // above status bar
            );

            egui::Area::new(egui::Id::new(("toast", i)))
                .fixed_pos(pos)
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    let bg = toast.level.background_color();
                    let fg = toast.level.text_color();
                    let bg = Color32::from_rgba_unmultiplied(bg.r(), bg.g(), bg.b(), (230.0 * opacity) as u8);
                    let fg = Color32::from_rgba_unmultiplied(fg.r(), fg.g(), fg.b(), (255.0 * opacity) as u8);

                    egui::Frame::none()
                        .fill(bg)
                        .rounding(6.0)
                        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                        .stroke(egui::Stroke::new(1.0, fg.gamma_multiply(0.3)))
                        .show(ui, |ui| {
                            ui.set_min_width(toast_width - 24.0);
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(toast.level.icon()).color(fg).strong());
                                ui.label(RichText::new(&toast.message).color(fg));
                                if let Some(action) = &toast.action {
                                    if ui.button(action.label()).clicked() {
                                        clicked = Some(i);
                                    }
                                }
                            });
                        });
                });
        }

        let index = clicked?;
        self.toasts.remove(index).action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actionable_toast_outlives_plain_error() {
        let plain = Toast::error("boom");
        let retry = Toast::error("boom").with_action(ToastAction::RetryLoad(PathBuf::from("p.json")));
        assert!(retry.duration > plain.duration);
        assert_eq!(retry.action.as_ref().map(ToastAction::label), Some("Retry"));
    }

    #[test]
    fn expired_toasts_are_dropped() {
        let mut manager = ToastManager::new();
        manager.add(Toast::success("saved").with_duration(Duration::ZERO));
        manager.warning("still here");
        manager.cleanup();
        assert_eq!(manager.toasts().len(), 1);
        assert_eq!(manager.toasts()[0].level, ToastLevel::Warning);
    }

    #[test]
    fn fresh_toast_is_opaque() {
        assert_eq!(Toast::success("ok").opacity(), 1.0);
        assert_eq!(Toast::success("gone").with_duration(Duration::ZERO).opacity(), 0.0);
    }
}
