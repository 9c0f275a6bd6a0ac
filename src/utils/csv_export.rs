//! CSV 직렬화 헬퍼
//!
//! `Serialize` 구현 타입의 목록을 헤더가 포함된 RFC 4180 CSV 문자열로 변환합니다.

use serde::Serialize;
use crate::core::errors::{AppResult, ErrorContext};

/// 레코드 목록을 CSV 문자열로 직렬화합니다.
///
/// 헤더는 첫 레코드의 필드 이름으로 생성되며, 목록이 비어 있으면 빈 문자열입니다.
pub fn to_csv<T: Serialize>(rows: &[T]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for row in rows {
        writer
            .serialize(row)
            .context("CSV 직렬화 실패")?;
    }

    let bytes = writer
        .into_inner()
        .context("CSV 버퍼 플러시 실패")?;

    String::from_utf8(bytes)
        .context("CSV UTF-8 변환 실패")
}

/// `Content-Disposition` 헤더 값
pub fn attachment_disposition(filename: &str) -> String {
    format!("attachment; filename=\"{}\"", filename.replace('"', ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row<'a> {
        date: &'a str,
        note: &'a str,
        total_kg: f64,
    }

    #[test]
    fn test_to_csv_writes_header_and_quotes_fields() {
        let rows = [
            Row { date: "2024-03-01", note: "bus, then walk", total_kg: 1.25 },
            Row { date: "2024-03-02", note: "said \"hi\"", total_kg: 0.0 },
        ];

        let csv = to_csv(&rows).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "date,note,total_kg");
        assert_eq!(lines[1], "2024-03-01,\"bus, then walk\",1.25");
        assert_eq!(lines[2], "2024-03-02,\"said \"\"hi\"\"\",0.0");
    }

    #[test]
    fn test_to_csv_empty_rows() {
        let rows: Vec<Row> = Vec::new();
        assert_eq!(to_csv(&rows).unwrap(), "");
    }

    #[test]
    fn test_attachment_disposition() {
        assert_eq!(
            attachment_disposition("activities.csv"),
            "attachment; filename=\"activities.csv\""
        );
    }
}
