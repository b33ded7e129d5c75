use super::*;

fn passing() -> Metrics {
    Metrics {
        contrast: Some(12.0),
        headline_words: Some(3),
        clutter_objects: 2,
        brand_coverage: 0.05,
        margin_violations: Vec::new(),
        thumbnail_contrast: Some(8.0),
        face: FaceSignal::NoPhotos,
    }
}

fn labels(a: &Analysis) -> Vec<&str> {
    a.findings.iter().map(|f| f.label.as_str()).collect()
}

#[test]
fn all_passing_scores_100_in_fixed_order() {
    let a = score(&passing());
    assert_eq!(a.score, 100);
    assert!(a.findings.iter().all(|f| f.ok));
    assert_eq!(
        labels(&a),
        vec![
            LABEL_CONTRAST,
            LABEL_BREVITY,
            LABEL_CLUTTER,
            LABEL_BRAND,
            LABEL_MARGIN,
            LABEL_READABILITY
        ]
    );
    assert_eq!(a.grade(), Grade::Good);
}

#[test]
fn each_failure_costs_its_penalty() {
    let cases: Vec<(Box<dyn Fn(&mut Metrics)>, u8)> = vec![
        (Box::new(|m: &mut Metrics| m.contrast = Some(3.0)), PENALTY_LOW_CONTRAST),
        (Box::new(|m: &mut Metrics| m.contrast = None), PENALTY_NO_TEXT),
        (Box::new(|m: &mut Metrics| m.headline_words = Some(7)), PENALTY_LONG_HEADLINE),
        (Box::new(|m: &mut Metrics| m.clutter_objects = 6), PENALTY_CLUTTER),
        (Box::new(|m: &mut Metrics| m.brand_coverage = 0.019), PENALTY_BRAND),
        (Box::new(|m: &mut Metrics| m.margin_violations = vec!["t".into()]), PENALTY_MARGIN),
        (Box::new(|m: &mut Metrics| m.thumbnail_contrast = Some(2.9)), PENALTY_READABILITY),
        (Box::new(|m: &mut Metrics| m.face = FaceSignal::SkinFraction(0.01)), PENALTY_FACE),
    ];
    for (mutate, penalty) in cases {
        let mut m = passing();
        mutate(&mut m);
        let a = score(&m);
        assert_eq!(a.score, 100 - penalty, "{:?}", a.failures().collect::<Vec<_>>());
        assert_eq!(a.failures().count(), 1);
    }
}

#[test]
fn thresholds_are_inclusive() {
    let mut m = passing();
    m.contrast = Some(CONTRAST_MIN_RATIO);
    m.headline_words = Some(HEADLINE_MAX_WORDS);
    m.clutter_objects = CLUTTER_MAX_OBJECTS;
    m.brand_coverage = BRAND_MIN_COVERAGE;
    m.thumbnail_contrast = Some(READABILITY_MIN_RATIO);
    m.face = FaceSignal::SkinFraction(FACE_MIN_SKIN_FRACTION);
    assert_eq!(score(&m).score, 100);
}

#[test]
fn missing_text_fails_three_findings() {
    let mut m = passing();
    m.contrast = None;
    m.headline_words = None;
    m.thumbnail_contrast = None;
    let a = score(&m);
    assert_eq!(
        a.finding(LABEL_CONTRAST).and_then(|f| f.detail.as_deref()),
        Some("no headline text")
    );
    assert_eq!(
        a.score,
        100 - PENALTY_NO_TEXT - PENALTY_LONG_HEADLINE - PENALTY_READABILITY
    );
}

#[test]
fn worst_case_stays_in_range() {
    let m = Metrics {
        contrast: None,
        headline_words: None,
        clutter_objects: 50,
        brand_coverage: 0.0,
        margin_violations: vec!["a".into(), "b".into()],
        thumbnail_contrast: None,
        face: FaceSignal::SkinFraction(0.0),
    };
    let a = score(&m);
    assert_eq!(a.score, 2);
    assert_eq!(a.findings.len(), 7);
    assert!(a.findings.iter().all(|f| !f.ok));
    assert_eq!(a.grade(), Grade::Poor);
}

#[test]
fn skipped_photo_passes_face_check() {
    let mut m = passing();
    m.face = FaceSignal::Skipped;
    let a = score(&m);
    let face = a.finding(LABEL_FACE).unwrap();
    assert!(face.ok);
    assert!(face.detail.as_deref().unwrap().contains("skipped"));
    assert_eq!(a.score, 100);
}

#[test]
fn details_carry_measured_values() {
    let mut m = passing();
    m.contrast = Some(3.123);
    let a = score(&m);
    assert_eq!(
        a.finding(LABEL_CONTRAST).unwrap().detail.as_deref(),
        Some("contrast 3.12:1 (min 4.5:1)")
    );
    assert_eq!(
        a.finding(LABEL_BRAND).unwrap().detail.as_deref(),
        Some("brand color covers 5.0% (min 2.0%)")
    );
}

#[test]
fn grade_boundaries() {
    let grade = |score| Analysis { score, findings: Vec::new() }.grade();
    assert_eq!(grade(85), Grade::Good);
    assert_eq!(grade(84), Grade::Fair);
    assert_eq!(grade(70), Grade::Fair);
    assert_eq!(grade(69), Grade::Poor);
    assert_eq!(Grade::Fair.to_string(), "fair");
}

#[test]
fn json_omits_missing_detail() {
    let a = Analysis {
        score: 90,
        findings: vec![Finding {
            label: "x".to_owned(),
            ok: true,
            detail: None,
        }],
    };
    let json = serde_json::to_string(&a).unwrap();
    assert_eq!(json, r#"{"score":90,"findings":[{"label":"x","ok":true}]}"#);
    let back: Analysis = serde_json::from_str(&json).unwrap();
    assert_eq!(back, a);
}
