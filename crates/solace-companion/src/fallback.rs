use std::collections::HashMap;

use rand::Rng;
use rand::seq::IndexedRandom;
use regex::Regex;

/// Category used when no keyword rule matches.
pub const DEFAULT_CATEGORY: &str = "general";

/// Returned only if the default category has no responses at all.
pub const LAST_RESORT_REPLY: &str = "I'm sorry, I can't help properly right now. Please try \
again in a little while, or reach out to a professional counselor. 😊";

/// Keyword rules, scanned in order. The first match wins, so the more
/// urgent categories come first. English words are anchored on word
/// boundaries; stems only at the front.
pub const KEYWORD_PATTERNS: &[(&str, &str)] = &[
    (
        "crisis",
        r"(?i)\bsuicid\w*|\bkill myself\b|\bend my life\b|\bself[- ]?harm\w*|\bhurt myself\b|\bdon'?t want to live\b|自杀|自残|不想活",
    ),
    (
        "anxiety",
        r"(?i)\banxi\w*|\bnervous\b|\bworr\w*|\bpanic\w*|\bon edge\b|焦虑|紧张|担心|害怕",
    ),
    (
        "sadness",
        r"(?i)\b(?:sad|sadness|hopeless|unhappy|miserable)\b|\bdepress\w*|\bcr(?:y|ies|ied|ying)\b|\b(?:feel|feeling|felt)(?: so| really| very)? (?:down|low)\b|难过|伤心|抑郁|哭",
    ),
    (
        "stress",
        r"(?i)\bstress\w*|\boverwhelm\w*|\bpressure\b|\bburn(?:ed|t)?[- ]?out\b|\bdeadlines?\b|\btoo much work\b|压力|累|崩溃",
    ),
    (
        "loneliness",
        r"(?i)\b(?:lonely|loneliness|alone|isolated|nobody)\b|\bno one\b|孤独|寂寞|一个人",
    ),
    (
        "anger",
        r"(?i)\b(?:angry|furious|rage|annoyed)\b|\bmad at\b|\bfrustrat\w*|生气|愤怒|烦",
    ),
    (
        "sleep",
        r"(?i)\bsleep\w*|\binsomnia\b|\bawake at night\b|\bnightmares?\b|失眠|睡不着|噩梦",
    ),
    (
        "gratitude",
        r"(?i)\bthank\w*|\bgrateful\b|\bappreciat\w*|\b(?:happy|glad)\b|\bbetter now\b|谢谢|感谢|开心|高兴",
    ),
];

pub const KEYWORD_RESPONSES: &[(&str, &[&str])] = &[
    (
        "crisis",
        &[
            "I'm really glad you told me. What you're carrying sounds very heavy, and you deserve support right now. Please contact a crisis line or someone you trust as soon as you can; you don't have to face this alone.",
            "Thank you for trusting me with this. Your safety matters most. Please reach out to a local emergency number or a crisis hotline now, and stay near someone who can be with you.",
        ],
    ),
    (
        "anxiety",
        &[
            "It sounds like you're feeling really anxious. That tightness is hard to sit with. Would you like to try a slow breath together: in for four, hold for four, out for six?",
            "Worry has a way of filling every corner of the mind. What is the thought that keeps coming back the most right now?",
            "Feeling on edge like this makes a lot of sense given what you're facing. I'm here with you. What would help you feel even a little safer in this moment?",
        ],
    ),
    (
        "sadness",
        &[
            "It sounds like you're feeling really low. That's a painful place to be, and it's okay to feel it. Do you want to tell me more about what's been weighing on you?",
            "I'm sorry things feel so heavy right now. You don't have to put on a brave face here. What has today been like for you?",
            "Sadness deserves room too. I'm listening, whenever you're ready to share more. 😊",
        ],
    ),
    (
        "stress",
        &[
            "That sounds like a lot to hold at once. When everything feels urgent, it can help to pick just one small thing. What feels most pressing to you?",
            "Being stretched this thin is exhausting. You're doing more than you give yourself credit for. What would a short break look like for you today?",
        ],
    ),
    (
        "loneliness",
        &[
            "Feeling alone can hurt in a very quiet way. I'm glad you reached out. Who, even from long ago, has made you feel understood?",
            "Loneliness is something many people carry silently. Right now, you're not alone in this conversation. What has been making you feel most isolated?",
        ],
    ),
    (
        "anger",
        &[
            "It sounds like something really got to you, and anger often points to something that matters. What happened?",
            "Frustration like this makes sense. Would it help to put into words what felt most unfair?",
        ],
    ),
    (
        "sleep",
        &[
            "Not sleeping well makes everything harder. Has something been on your mind at night lately?",
            "Rest has been hard to come by, it seems. A calm, screen-free wind-down can help a little. What usually goes through your mind when you lie awake?",
        ],
    ),
    (
        "gratitude",
        &[
            "I'm really glad to hear that. 😊 What do you think helped most?",
            "That's wonderful. It's worth pausing to notice moments like this. How does it feel right now?",
        ],
    ),
    (
        DEFAULT_CATEGORY,
        &[
            "Thank you for sharing that with me. How are you feeling about it right now?",
            "I'm here and listening. Could you tell me a little more about what's on your mind?",
            "That sounds important to you. What feelings come up when you think about it?",
            "Whatever you're going through, you don't have to go through it alone. I'm here with you. 😊",
        ],
    ),
];

struct Rule {
    category: String,
    pattern: Regex,
}

/// Local keyword responder used when the remote model is unavailable.
pub struct FallbackResponder {
    rules: Vec<Rule>,
    responses: HashMap<String, Vec<String>>,
}

impl FallbackResponder {
    pub fn new(patterns: &[(&str, &str)], responses: &[(&str, &[&str])]) -> Result<Self, regex::Error> {
        let rules = patterns
            .iter()
            .map(|(category, pattern)| {
                Ok(Rule {
                    category: (*category).to_string(),
                    pattern: Regex::new(pattern)?,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        let responses = responses
            .iter()
            .map(|(category, lines)| {
                (
                    (*category).to_string(),
                    lines.iter().map(|l| (*l).to_string()).collect(),
                )
            })
            .collect();

        Ok(Self { rules, responses })
    }

    pub fn builtin() -> Result<Self, regex::Error> {
        Self::new(KEYWORD_PATTERNS, KEYWORD_RESPONSES)
    }

    /// First rule that matches and has responses to offer.
    pub fn category_for(&self, message: &str) -> Option<&str> {
        self.rules
            .iter()
            .filter(|rule| rule.pattern.is_match(message))
            .find(|rule| self.responses_for(&rule.category).is_some())
            .map(|rule| rule.category.as_str())
    }

    pub fn respond(&self, message: &str) -> String {
        self.respond_with(message, &mut rand::rng())
    }

    /// Never returns an empty string.
    pub fn respond_with<R: Rng + ?Sized>(&self, message: &str, rng: &mut R) -> String {
        let category = self.category_for(message).unwrap_or(DEFAULT_CATEGORY);

        self.responses_for(category)
            .and_then(|lines| lines.choose(rng))
            .cloned()
            .unwrap_or_else(|| LAST_RESORT_REPLY.to_string())
    }

    fn responses_for(&self, category: &str) -> Option<&[String]> {
        self.responses
            .get(category)
            .map(Vec::as_slice)
            .filter(|lines| lines.iter().any(|l| !l.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn lines(category: &str) -> Vec<&'static str> {
        KEYWORD_RESPONSES
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, l)| l.to_vec())
            .unwrap()
    }

    #[test]
    fn builtin_table_is_consistent() {
        let responder = FallbackResponder::builtin().unwrap();
        for (category, _) in KEYWORD_PATTERNS {
            assert!(responder.responses_for(category).is_some(), "{category} has no responses");
        }
        assert!(responder.responses_for(DEFAULT_CATEGORY).is_some());
    }

    #[test]
    fn keyword_selects_category() {
        let responder = FallbackResponder::builtin().unwrap();
        assert_eq!(responder.category_for("I feel so anxious today"), Some("anxiety"));
        assert_eq!(responder.category_for("我最近很焦虑"), Some("anxiety"));
        assert_eq!(responder.category_for("I can't sleep at all"), Some("sleep"));
        assert_eq!(responder.category_for("What's the weather like?"), None);
    }

    #[test]
    fn keywords_match_whole_words_only() {
        let responder = FallbackResponder::builtin().unwrap();
        assert_eq!(responder.category_for("I have the courage to try"), None);
        assert_eq!(responder.category_for("My storage is average"), None);
        assert_eq!(responder.category_for("I downloaded a meditation app"), None);
        assert_eq!(responder.category_for("I lost money on crypto"), None);
        assert_eq!(
            responder.category_for("calm down, I'm happy today"),
            Some("gratitude")
        );
        assert_eq!(responder.category_for("I've been feeling down"), Some("sadness"));
        assert_eq!(responder.category_for("I cried all night"), Some("sadness"));
        assert_eq!(responder.category_for("Worrying keeps me up"), Some("anxiety"));
        assert_eq!(responder.category_for("so frustrating"), Some("anger"));
    }

    #[test]
    fn earlier_rule_wins() {
        let responder = FallbackResponder::builtin().unwrap();
        // matches both crisis and sadness
        assert_eq!(
            responder.category_for("I'm so sad I want to hurt myself"),
            Some("crisis")
        );
    }

    #[test]
    fn reply_comes_from_matched_category() {
        let responder = FallbackResponder::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let reply = responder.respond_with("work stress is crushing me", &mut rng);
            assert!(lines("stress").contains(&reply.as_str()));
        }
    }

    #[test]
    fn unmatched_message_uses_default_category() {
        let responder = FallbackResponder::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let reply = responder.respond_with("hello there", &mut rng);
        assert!(lines(DEFAULT_CATEGORY).contains(&reply.as_str()));
    }

    #[test]
    fn empty_category_is_skipped() {
        let responder = FallbackResponder::new(
            &[("first", "(?i)help"), ("second", "(?i)help")],
            &[("first", &[]), ("second", &["second reply"]), (DEFAULT_CATEGORY, &["default"])],
        )
        .unwrap();
        assert_eq!(responder.respond("help me"), "second reply");
    }

    #[test]
    fn empty_table_still_replies() {
        let responder = FallbackResponder::new(&[], &[]).unwrap();
        assert_eq!(responder.respond("anything"), LAST_RESORT_REPLY);
        assert_eq!(responder.respond(""), LAST_RESORT_REPLY);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        assert!(FallbackResponder::new(&[("broken", "(unclosed")], &[]).is_err());
    }
}
