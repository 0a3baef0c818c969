use ministry_model::{
    NewSeries, NewSermon, SectionKind, Sermon, SermonDraft, SermonSection, SermonSeries,
};
use ministry_types::{SeriesId, Timestamp, UserId};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn draft_from_sermon_defaults_missing_text() {
    let sermon = Sermon::new(UserId::new(), NewSermon::new("Bare"), Timestamp::now())
        .unwrap()
        .populate(None);

    let draft = SermonDraft::from_sermon(&sermon);
    assert_eq!(
        draft,
        SermonDraft {
            title: "Bare".into(),
            ..SermonDraft::default()
        }
    );
}

#[test]
fn draft_takes_series_id_from_joined_series() {
    let user = UserId::new();
    let series = SermonSeries::new(user, NewSeries::new("Advent"), Timestamp::now()).unwrap();
    let sermon = Sermon::new(user, NewSermon::new("Hope").in_series(series.id), Timestamp::now())
        .unwrap()
        .populate(Some(series.clone()));

    assert_eq!(SermonDraft::from_sermon(&sermon).series_id, Some(series.id));
}

#[test]
fn drafts_compare_structurally() {
    let a = SermonDraft {
        title: "A".into(),
        sections: vec![SermonSection::new("s", SectionKind::Introduction, "Intro", 0)],
        ..SermonDraft::default()
    };
    let b = a.clone();
    assert_eq!(a, b);

    let mut c = a.clone();
    c.sections[0].content.push('x');
    assert_ne!(a, c);
}

fn arb_draft() -> impl Strategy<Value = SermonDraft> {
    (
        "[a-zA-Z ]{1,20}",
        "[a-zA-Z0-9: ]{0,20}",
        ".{0,40}",
        proptest::bool::ANY,
    )
        .prop_map(|(title, scripture, notes, in_series)| SermonDraft {
            title,
            scripture,
            notes,
            sections: Vec::new(),
            series_id: in_series.then(SeriesId::new),
        })
}

proptest! {
    // Saving a draft through its patch and reading it back yields the same draft.
    #[test]
    fn patch_applies_every_editable_field(draft in arb_draft()) {
        let user = UserId::new();
        let mut sermon = Sermon::new(user, NewSermon::new("Start"), Timestamp::now()).unwrap();
        sermon.apply_patch(draft.to_patch(), Timestamp::now()).unwrap();

        let series = draft.series_id.map(|id| SermonSeries {
            id,
            ..SermonSeries::new(user, NewSeries::new("S"), Timestamp::now()).unwrap()
        });
        let loaded = SermonDraft::from_sermon(&sermon.populate(series));
        prop_assert_eq!(loaded, draft);
    }
}
