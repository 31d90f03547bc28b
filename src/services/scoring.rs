/// Ranks a candidate title against the original query.
///
/// Full-substring match earns 100, each query word longer than one
/// character contained in the title earns 20 (duplicated query words count
/// each time), and one point is deducted per 20 characters of title length
/// to favor concise titles. The result never drops below 10, so even a
/// completely irrelevant title keeps a floor score.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn relevance_score(title: &str, query: &str) -> i32 {
    let title_lower = title.to_lowercase();
    let query_lower = query.to_lowercase();

    let mut score = 0i32;

    if title_lower.contains(&query_lower) {
        score += 100;
    }

    for word in query_lower
        .split_whitespace()
        .filter(|w| w.chars().count() > 1)
    {
        if title_lower.contains(word) {
            score += 20;
        }
    }

    score -= (title.chars().count() / 20) as i32;

    score.max(10)
}

#[cfg(test)]
mod tests {
    use super::relevance_score;

    #[test]
    fn substring_and_word_matches_accumulate() {
        // 100 (substring) + 20 ("iphone") + 20 ("screen") - floor(26 / 20)
        assert_eq!(
            relevance_score("iPhone Screen Repair Guide", "iPhone screen"),
            139
        );
    }

    #[test]
    fn interrupted_phrase_earns_word_credit_only() {
        // "iphone screen" is not a contiguous substring here, so only the
        // two word matches score: 20 + 20 - floor(29 / 20).
        assert_eq!(
            relevance_score("iPhone 14 Screen Repair Guide", "iPhone screen"),
            39
        );
    }

    #[test]
    fn never_scores_below_ten() {
        let long_title = "x".repeat(400);
        assert_eq!(relevance_score(&long_title, "unrelated query"), 10);
        assert_eq!(relevance_score("", "anything"), 10);
    }

    #[test]
    fn monotone_in_matched_words() {
        // Same title length, growing number of matched words.
        let title = "fix toaster heating element now";
        let one = relevance_score(title, "toaster oven");
        let two = relevance_score(title, "toaster element");
        assert!(two >= one);
    }

    #[test]
    fn single_character_words_earn_nothing() {
        // "q" and "w" are both present in no word-credit position; only the
        // full-substring rule could score, and it does not match here.
        assert_eq!(relevance_score("q guide", "q w"), 10);
    }

    #[test]
    fn duplicate_query_words_count_twice() {
        let base = relevance_score("fix screen now", "screen cable");
        let doubled = relevance_score("fix screen now", "screen screen cable");
        assert_eq!(doubled, base + 20);
    }

    #[test]
    fn length_penalty_favors_concise_titles() {
        let concise = relevance_score("toaster repair", "toaster");
        let padded = relevance_score(
            &format!("toaster repair {}", "very long suffix ".repeat(10)),
            "toaster",
        );
        assert!(concise > padded);
    }
}
