//! 터미널 출력 포맷팅 유틸리티
//!
//! 서비스 레지스트리 초기화와 서버 시작 과정을 터미널에 보기 좋게 출력합니다.
//! `log` 출력과 별개로 사람이 읽기 위한 시작 화면용입니다.

const BOX_WIDTH: usize = 50;

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║         🔄 INITIALIZING SERVICE REGISTRY          ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    for line in boxed_title_lines(title) {
        println!("{}", line);
    }
}

fn boxed_title_lines(title: &str) -> [String; 3] {
    let border = "═".repeat(BOX_WIDTH);

    [
        format!("╔{}╗", border),
        format!("║{:^width$}║", title, width = BOX_WIDTH - 1),
        format!("╚{}╝", border),
    ]
}

/// 진행 단계 시작 (`→ Step 1: ...`)
pub fn print_step_start(step: u8, description: &str) {
    println!("\n→ Step {}: {}", step, description);
}

/// 진행 단계 완료 (`✓ Step 1 complete: ... (12)`)
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {} complete: {} ({})", step, description, count);
}

/// 단계 내부 하위 작업
pub fn print_sub_task(name: &str, status: &str) {
    println!("   • {:<32} {}", name, status);
}

/// 레지스트리 초기화 요약
pub fn print_final_summary(repos: usize, services: usize) {
    println!();
    print_boxed_title("✅ SERVICE REGISTRY READY");
    println!("   Repositories : {}", repos);
    println!("   Services     : {}", services);
    println!("   Total        : {}\n", repos + services);
}

/// 이름 캐시 초기화 로그
pub fn print_cache_initialized(cache_type: &str, count: usize) {
    println!("🗂️  {} name cache initialized ({} entries)", cache_type, count);
}

/// 외부 연동 상태 한 줄 출력 (`✅ Supabase    https://xyz.supabase.co`)
pub fn print_integration_status(name: &str, ready: bool, detail: &str) {
    let mark = if ready { "✅" } else { "⚠️ " };
    println!("{} {:<10} {}", mark, name, detail);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_title_lines_have_equal_width() {
        let lines = boxed_title_lines("ReLief");
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();

        assert_eq!(widths[0], widths[2]);
        assert_eq!(widths[0], BOX_WIDTH + 2);
        assert!(lines[1].contains("ReLief"));
    }
}
