//! 연속 접속일 계산
//!
//! 하루 한 건의 로그인 날짜 목록(중복 허용)을 입력으로 받습니다.

use chrono::NaiveDate;

/// 최신 날짜부터 하루 간격이 이어지는 동안의 길이. 첫 공백에서 멈춥니다.
pub fn current_streak(dates: &[NaiveDate]) -> u32 {
    let sorted = sorted_desc(dates);

    let Some(first) = sorted.first() else {
        return 0;
    };

    let mut streak = 1;
    let mut previous = *first;
    for date in sorted.iter().skip(1) {
        if (previous - *date).num_days() != 1 {
            break;
        }
        streak += 1;
        previous = *date;
    }

    streak
}

/// 기록 전체에서 가장 긴 연속 구간
pub fn longest_streak(dates: &[NaiveDate]) -> u32 {
    let sorted = sorted_desc(dates);

    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for date in sorted {
        run = match previous {
            Some(prev) if (prev - date).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }

    longest
}

/// 표시용 연속일. 마지막 접속이 오늘이나 어제가 아니면 이미 끊긴 것으로 봅니다.
pub fn active_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let past: Vec<NaiveDate> = dates.iter().copied().filter(|date| *date <= today).collect();

    match past.iter().max() {
        Some(latest) if (today - *latest).num_days() <= 1 => current_streak(&past),
        _ => 0,
    }
}

fn sorted_desc(dates: &[NaiveDate]) -> Vec<NaiveDate> {
    let mut sorted = dates.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.dedup();
    sorted
}
