//! 이메일 본문 템플릿
//!
//! 사용자 입력이 들어가는 자리는 모두 HTML 이스케이프합니다.

use crate::utils::string_utils::escape_html;

/// 렌더링된 메일 (HTML + 텍스트 대체 본문)
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><body style=\"font-family:Arial,sans-serif;color:#1f2937;\">\
         <div style=\"max-width:560px;margin:0 auto;padding:24px;\">\
         <h2 style=\"color:#15803d;\">🌿 ReLief</h2>{}\
         <p style=\"font-size:12px;color:#6b7280;\">You are receiving this email because you have a ReLief account.</p>\
         </div></body></html>",
        body
    )
}

pub fn welcome(name: &str, app_url: &str) -> RenderedEmail {
    let name = if name.trim().is_empty() { "there" } else { name.trim() };

    let html = layout(&format!(
        "<p>Hi {},</p>\
         <p>Welcome to ReLief! Log your first day of activities to see your carbon footprint, \
         check in daily to build a streak, and earn badges along the way.</p>\
         <p><a href=\"{}\" style=\"color:#15803d;\">Open ReLief</a></p>",
        escape_html(name),
        escape_html(app_url)
    ));

    let text = format!(
        "Hi {},\n\nWelcome to ReLief! Log your first day of activities to see your carbon footprint, \
         check in daily to build a streak, and earn badges along the way.\n\n{}\n",
        name, app_url
    );

    RenderedEmail { subject: "Welcome to ReLief 🌱".to_string(), html, text }
}

/// 관리자 공지. 빈 줄로 나뉜 문단을 `<p>`로 감쌉니다.
pub fn announcement(subject: &str, message: &str) -> RenderedEmail {
    let paragraphs: String = message
        .split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| format!("<p>{}</p>", escape_html(paragraph).replace('\n', "<br>")))
        .collect();

    RenderedEmail {
        subject: subject.trim().to_string(),
        html: layout(&paragraphs),
        text: message.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_escapes_name() {
        let email = welcome("<script>alert(1)</script>", "https://relief.app");

        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("&lt;script&gt;"));
        assert!(email.html.contains("https://relief.app"));
    }

    #[test]
    fn test_welcome_blank_name_fallback() {
        let email = welcome("  ", "https://relief.app");
        assert!(email.text.starts_with("Hi there,"));
    }

    #[test]
    fn test_announcement_paragraphs() {
        let email = announcement(" Earth Hour ", "Lights out at 8:30.\nJoin us!\n\n\nThanks & see you");

        assert_eq!(email.subject, "Earth Hour");
        assert!(email.html.contains("<p>Lights out at 8:30.<br>Join us!</p>"));
        assert!(email.html.contains("<p>Thanks &amp; see you</p>"));
    }
}
