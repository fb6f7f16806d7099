// libs/appointment-cell/src/services/templates.rs
use shared_config::AppConfig;

use crate::models::NotificationKind;

#[derive(Debug, Clone, PartialEq)]
pub struct ClinicBranding {
    pub name: String,
    pub banner_url: String,
}

impl ClinicBranding {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            name: config.clinic_name.clone(),
            banner_url: config.clinic_banner_url.clone(),
        }
    }
}

/// Everything the notification email needs to say about one appointment.
#[derive(Debug, Clone)]
pub struct NotificationContext<'a> {
    pub kind: NotificationKind,
    pub schedule_time: &'a str,
    pub physician: &'a str,
    pub cancellation_reason: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
}

pub fn compose_notification(branding: &ClinicBranding, context: &NotificationContext<'_>) -> EmailContent {
    EmailContent {
        subject: subject_line(branding, context.kind),
        html: render_body(branding, context),
    }
}

pub fn subject_line(branding: &ClinicBranding, kind: NotificationKind) -> String {
    match kind {
        NotificationKind::Schedule => format!("Your Appointment is Confirmed - {}", branding.name),
        NotificationKind::Cancel => format!("Your Appointment has been Cancelled - {}", branding.name),
    }
}

fn status_paragraph(context: &NotificationContext<'_>) -> String {
    let time = escape_html(context.schedule_time);

    match context.kind {
        NotificationKind::Schedule => format!(
            "We are pleased to inform you that your appointment has been <strong>successfully scheduled</strong> \
             for <strong>{}</strong> with <strong>{}</strong>.",
            time,
            escape_html(&physician_title(context.physician)),
        ),
        NotificationKind::Cancel => format!(
            "We regret to inform you that your appointment originally scheduled for <strong>{}</strong> \
             has been <strong>cancelled</strong>.<br/><br/>Reason: <em>{}</em>.",
            time,
            escape_html(context.cancellation_reason.unwrap_or("No reason provided")),
        ),
    }
}

fn render_body(branding: &ClinicBranding, context: &NotificationContext<'_>) -> String {
    let name = escape_html(&branding.name);

    format!(
        r#"<div style="font-family: Arial, sans-serif; padding: 20px; background-color: #f9f9f9;">
  <div style="max-width: 600px; margin: auto; background: #ffffff; padding: 20px; border-radius: 8px;">
    <h2 style="color: #10b981; text-align: center;">{name}</h2>
    <img src="{banner}" alt="{name} Banner" style="display: block; margin: 0 auto 20px auto; max-width: 100%; border-radius: 6px;" />
    <p style="font-size: 16px;">Dear Valued Patient,</p>
    <p style="font-size: 16px;">{status}</p>
    <hr style="margin: 30px 0;" />
    <p style="font-size: 15px; line-height: 1.6; color: #444;">
      {name} is committed to offering high-quality, compassionate care to the university community.
      Our services include general consultations, chronic illness management, preventive screenings,
      vaccination programs, reproductive health support, and mental wellness services.
      <br/><br/>
      We aim to ensure your health and wellbeing are always a priority through accessible and professional medical services.
    </p>
    <p style="margin-top: 30px; font-size: 14px; color: #666;">
      Warm regards,<br/>
      <strong>{name} Team</strong><br/>
      <em>Your Health, Our Priority.</em>
    </p>
  </div>
</div>"#,
        name = name,
        banner = escape_html(&branding.banner_url),
        status = status_paragraph(context),
    )
}

/// Prefixes "Dr." unless the stored name already carries it.
fn physician_title(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.starts_with("Dr.") || trimmed.starts_with("Dr ") {
        trimmed.to_string()
    } else {
        format!("Dr. {}", trimmed)
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
