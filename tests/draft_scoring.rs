use growth_desk::draft::{
    build_draft, extract_draft_features, generate_hook, DraftParts, DraftScorer, Grade, HookStyle, NoteKind,
    PostObjective,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const STRONG: &str = "Energy costs fell 40% in a year.\n\nSignal: new solar report from the IEA.\nImplication: this means compute gets cheaper.\nWhat changes first?\nFollow for daily frontier synthesis.";

const ONE_LINER: &str = "Energy costs fell 40% in a year and most operators still price compute like it is 2019, which is a mistake worth fixing.";

#[test]
fn empty_draft_scores_zero_with_one_note() {
    let scorer = DraftScorer::default();
    for text in ["", "   \n\t "] {
        let result = scorer.score(text);
        assert_eq!(result.score, 0);
        assert_eq!(result.grade, Grade::F);
        assert_eq!(result.notes.len(), 1);
        assert_eq!(result.notes[0].message, "Draft is empty.");
    }
}

#[test]
fn tiny_draft_collects_deficiencies() {
    let result = DraftScorer::default().score("Hi");

    // 4 length + 5 structure + 10 no hype
    assert_eq!(result.score, 19);
    assert_eq!(result.grade, Grade::F);
    assert_eq!(result.deficiencies().count(), 5);
    assert!(result
        .notes
        .iter()
        .any(|note| note.message == "Too short for high-context conversion."));
}

#[test]
fn complete_draft_reaches_the_ceiling() {
    let result = DraftScorer::default().score(STRONG);

    assert_eq!(result.score, 100);
    assert_eq!(result.grade, Grade::A);
    assert_eq!(result.deficiencies().count(), 0);
}

#[test]
fn single_line_draft_gets_partial_credit() {
    let result = DraftScorer::default().score(ONE_LINER);

    // 12 length + 5 structure + 16 signal + 10 no hype
    assert_eq!(result.score, 43);
    assert_eq!(result.grade, Grade::D);
    let deficiencies: Vec<&str> = result.deficiencies().map(|note| note.message.as_str()).collect();
    assert_eq!(
        deficiencies,
        vec![
            "Add line breaks for scanability.",
            "State implication explicitly.",
            "Add explicit reason-to-follow close.",
        ]
    );
}

#[test]
fn features_count_non_empty_lines_and_whole_hype_words() {
    let features = extract_draft_features(STRONG);
    assert_eq!(features.char_count, 175);
    assert_eq!(features.line_count, 5);
    assert!(features.has_number);
    assert!(features.has_question);
    assert!(features.has_follow_cta);
    assert_eq!(features.hype_count, 0);

    let features = extract_draft_features("This moonshot is not hype. LFG, this is insane!");
    assert_eq!(features.hype_count, 2);
}

#[test]
fn repeated_hype_costs_points() {
    let scorer = DraftScorer::default();

    assert_eq!(scorer.score("Hi").score, 19);
    assert_eq!(scorer.score("Hi wild").score, 14);
    let many = scorer.score("Hi wild insane");
    assert_eq!(many.score, 1);
    assert!(many
        .notes
        .iter()
        .any(|note| note.kind == NoteKind::Deficiency && note.message.starts_with("Reduce hype words")));
}

#[test]
fn pillar_alignment_adds_credit() {
    let scorer = DraftScorer::new(vec!["Energy".to_string(), "ai".to_string()]);
    let result = scorer.score(ONE_LINER);
    assert_eq!(result.score, 51);

    let scorer = DraftScorer::new(vec!["robotics".to_string()]);
    let result = scorer.score(ONE_LINER);
    assert_eq!(result.score, 43);
    assert!(result
        .notes
        .iter()
        .any(|note| note.message == "Tie the draft to one of your content pillars."));
}

#[test]
fn short_pillar_keywords_never_match() {
    let scorer = DraftScorer::new(vec!["ai".to_string()]);
    let result = scorer.score("Most ai labs still price compute like it is 2019, and that will not last.");

    assert!(result
        .notes
        .iter()
        .all(|note| note.message != "Aligned with a content pillar."));
}

#[test]
fn scoring_is_deterministic() {
    let scorer = DraftScorer::new(vec!["solar".to_string()]);
    let first = scorer.score(STRONG);
    let second = scorer.score(STRONG);

    assert_eq!(first.score, second.score);
    assert_eq!(first.notes, second.notes);
}

#[test]
fn grade_bands() {
    assert_eq!(Grade::from_score(85), Grade::A);
    assert_eq!(Grade::from_score(84), Grade::B);
    assert_eq!(Grade::from_score(70), Grade::B);
    assert_eq!(Grade::from_score(55), Grade::C);
    assert_eq!(Grade::from_score(40), Grade::D);
    assert_eq!(Grade::from_score(39), Grade::F);
    assert_eq!(Grade::C.label(), "C");
}

#[test]
fn built_draft_fills_placeholders() {
    let draft = build_draft(&DraftParts::default());
    let lines: Vec<&str> = draft.split('\n').collect();

    assert_eq!(lines.len(), 7);
    assert_eq!(lines[2], "Source context: [optional account/event]");
    assert_eq!(lines[3], "Signal: [insert concrete event, quote, or data point]");
    assert_eq!(lines[6], "If this resonates, follow for daily frontier signal synthesis.");
}

#[test]
fn built_draft_uses_given_parts() {
    let parts = DraftParts {
        hook: "Power is the new compute bottleneck.".to_string(),
        source_handle: Some("@elonmusk".to_string()),
        signal: "Grid queues doubled since 2022.".to_string(),
        insight: "Siting beats chips for the next buildout.".to_string(),
        close: String::new(),
    };
    let draft = build_draft(&parts);

    assert!(draft.starts_with("Power is the new compute bottleneck.\n\n"));
    assert!(draft.contains("Source context: @elonmusk\n"));
    assert!(draft.contains("Signal: Grid queues doubled since 2022.\n"));
    assert!(draft.contains("Implication: Siting beats chips for the next buildout.\n"));

    let result = DraftScorer::default().score(&draft);
    assert!(result.score >= 85, "score was {}", result.score);
}

#[test]
fn hooks_come_from_the_style_bank() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..10 {
        let hook = generate_hook(HookStyle::Question, PostObjective::Discussion, &mut rng);
        let base = hook
            .strip_suffix(" What do you think changes first?")
            .expect("suffix appended");
        assert!(HookStyle::Question.bank().contains(&base));
    }
}

#[test]
fn hook_options_parse_case_insensitively() {
    assert_eq!("Contrarian".parse::<HookStyle>(), Ok(HookStyle::Contrarian));
    assert_eq!(
        "rant".parse::<HookStyle>(),
        Err("invalid hook style: rant".to_string())
    );
    assert_eq!("".parse::<PostObjective>(), Ok(PostObjective::None));
    assert_eq!(" FOLLOW ".parse::<PostObjective>(), Ok(PostObjective::Follow));
    assert!("viral".parse::<PostObjective>().is_err());
}
