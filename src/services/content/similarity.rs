//! 임베딩 유사도

/// 코사인 유사도. 길이가 다르거나 비어 있거나 영벡터면 `None`
pub fn cosine(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.is_empty() || a.len() != b.len() {
        return None;
    }

    let (dot, norm_a, norm_b) = a.iter().zip(b).fold((0.0_f32, 0.0_f32, 0.0_f32), |(dot, na, nb), (x, y)| {
        (dot + x * y, na + x * x, nb + y * y)
    });

    let denominator = norm_a.sqrt() * norm_b.sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }

    Some(dot / denominator)
}

/// 질의 벡터와의 유사도 내림차순 상위 `limit`개. 비교할 수 없는 후보는 제외합니다.
pub fn rank<T>(query: &[f32], candidates: Vec<(T, Vec<f32>)>, limit: usize) -> Vec<(T, f32)> {
    let mut scored: Vec<(T, f32)> = candidates
        .into_iter()
        .filter_map(|(item, embedding)| cosine(query, &embedding).map(|score| (item, score)))
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_basic_cases() {
        assert_eq!(cosine(&[1.0, 0.0], &[1.0, 0.0]), Some(1.0));
        assert_eq!(cosine(&[1.0, 0.0], &[0.0, 1.0]), Some(0.0));
        assert_eq!(cosine(&[1.0, 0.0], &[-1.0, 0.0]), Some(-1.0));
    }

    #[test]
    fn test_cosine_is_scale_invariant() {
        let a = cosine(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((a - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_rejects_incomparable_vectors() {
        assert_eq!(cosine(&[], &[]), None);
        assert_eq!(cosine(&[1.0, 2.0], &[1.0]), None);
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 1.0]), None);
    }

    #[test]
    fn test_rank_orders_and_truncates() {
        let candidates = vec![
            ("bus", vec![0.0, 1.0]),
            ("bike", vec![1.0, 0.1]),
            ("broken", vec![1.0]),
            ("walk", vec![1.0, 0.5]),
        ];

        let ranked = rank(&[1.0, 0.0], candidates, 2);
        let names: Vec<&str> = ranked.iter().map(|(name, _)| *name).collect();

        assert_eq!(names, vec!["bike", "walk"]);
    }
}
