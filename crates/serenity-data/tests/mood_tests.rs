//! Mood tracking integration tests.
//!
//! Covers: entry validation, history limits and clamping, ordering,
//! summaries, and mood type serde.

mod mood_type_tests {
    use serde_json::json;
    use serenity_core::models::MoodLevel;

    #[test]
    fn score_maps_one_to_five() {
        assert_eq!(MoodLevel::VeryLow.score(), 1);
        assert_eq!(MoodLevel::Low.score(), 2);
        assert_eq!(MoodLevel::Neutral.score(), 3);
        assert_eq!(MoodLevel::Good.score(), 4);
        assert_eq!(MoodLevel::VeryGood.score(), 5);
    }

    #[test]
    fn levels_order_by_wellbeing() {
        assert!(MoodLevel::VeryLow < MoodLevel::Low);
        assert!(MoodLevel::Low < MoodLevel::Neutral);
        assert!(MoodLevel::Good < MoodLevel::VeryGood);
    }

    #[test]
    fn level_serde_names() {
        assert_eq!(
            serde_json::to_value(MoodLevel::VeryLow).unwrap(),
            json!("very_low")
        );
        let parsed: MoodLevel = serde_json::from_value(json!("good")).unwrap();
        assert_eq!(parsed, MoodLevel::Good);
    }

    #[test]
    fn level_from_str() {
        assert_eq!(MoodLevel::from_str("very_good"), Some(MoodLevel::VeryGood));
        assert_eq!(MoodLevel::from_str("neutral"), Some(MoodLevel::Neutral));
        assert_eq!(MoodLevel::from_str("amazing"), None);
    }
}

mod mood_flow_tests {
    use std::sync::Arc;

    use chrono::{TimeDelta, Utc};
    use serde_json::json;
    use serenity_core::error::DataError;
    use serenity_core::models::MoodLevel;
    use serenity_core::options::SerenityOptions;
    use serenity_core::store::adapter::StoreAdapter;
    use serenity_data::{MoodService, MoodSummary, NewMoodEntry, SerenityData};
    use serenity_memory::MemoryStore;

    async fn seed_entries(store: &MemoryStore, user_id: &str, count: usize) {
        let base = Utc::now() - TimeDelta::days(400);
        for i in 0..count {
            let at = (base + TimeDelta::minutes(i as i64)).to_rfc3339();
            store
                .create(
                    "mood_entries",
                    json!({
                        "id": format!("m{}", i),
                        "user_id": user_id,
                        "mood_level": "neutral",
                        "created_at": at,
                    }),
                )
                .await
                .unwrap();
        }
    }

    // ── History limits ──────────────────────────────────────────────

    #[tokio::test]
    async fn history_defaults_to_thirty_entries_newest_first() {
        let store = Arc::new(MemoryStore::new());
        let svc = MoodService::new(store.clone());
        seed_entries(&store, "usr_1", 40).await;

        let entries = svc.get_user_mood_entries("usr_1", None).await;
        assert_eq!(entries.len(), 30);
        assert_eq!(entries[0].id, "m39");
        assert!(entries[0].created_at > entries[29].created_at);
    }

    #[tokio::test]
    async fn oversized_requests_clamp_to_the_cap() {
        let store = Arc::new(MemoryStore::new());
        let svc = MoodService::new(store.clone());
        seed_entries(&store, "usr_1", 370).await;

        let entries = svc.get_user_mood_entries("usr_1", Some(1000)).await;
        assert_eq!(entries.len(), 365);
    }

    #[tokio::test]
    async fn zero_limit_clamps_to_one() {
        let store = Arc::new(MemoryStore::new());
        let svc = MoodService::new(store.clone());
        seed_entries(&store, "usr_1", 3).await;

        let entries = svc.get_user_mood_entries("usr_1", Some(0)).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "m2");
    }

    #[tokio::test]
    async fn custom_limits_flow_through_options() {
        let store = Arc::new(MemoryStore::new());
        let options = SerenityOptions::default().mood_limits(2, 5);
        let data = SerenityData::with_options(store.clone(), options).unwrap();
        seed_entries(&store, "usr_1", 8).await;

        let defaulted = data.moods().get_user_mood_entries("usr_1", None).await;
        assert_eq!(defaulted.len(), 2);

        let capped = data.moods().get_user_mood_entries("usr_1", Some(100)).await;
        assert_eq!(capped.len(), 5);
    }

    // ── Recording ───────────────────────────────────────────────────

    #[tokio::test]
    async fn add_entry_round_trips() {
        let svc = MoodService::new(Arc::new(MemoryStore::new()));
        let mut input = NewMoodEntry::new("usr_1", MoodLevel::Good);
        input.energy_level = Some(4);
        input.sleep_hours = Some(7.5);
        let saved = svc.add_mood_entry(input).await.unwrap();
        assert_eq!(saved.mood_level, MoodLevel::Good);
        assert_eq!(saved.energy_level, Some(4));

        let history = svc.get_user_mood_entries("usr_1", None).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, saved.id);
    }

    #[tokio::test]
    async fn several_entries_per_day_all_kept() {
        let svc = MoodService::new(Arc::new(MemoryStore::new()));
        for level in [MoodLevel::Low, MoodLevel::Neutral, MoodLevel::Good] {
            svc.add_mood_entry(NewMoodEntry::new("usr_1", level))
                .await
                .unwrap();
        }

        let history = svc.get_user_mood_entries("usr_1", None).await;
        assert_eq!(history.len(), 3);
        // Newest first, so the evening check-in leads.
        let levels: Vec<MoodLevel> = history.iter().map(|e| e.mood_level).collect();
        assert_eq!(
            levels,
            [MoodLevel::Good, MoodLevel::Neutral, MoodLevel::Low]
        );
    }

    #[tokio::test]
    async fn out_of_range_dimensions_are_rejected() {
        let svc = MoodService::new(Arc::new(MemoryStore::new()));

        let mut spiked = NewMoodEntry::new("usr_1", MoodLevel::Good);
        spiked.anxiety_level = Some(9);
        assert!(matches!(
            svc.add_mood_entry(spiked).await.unwrap_err(),
            DataError::Validation(_)
        ));

        let mut marathon = NewMoodEntry::new("usr_1", MoodLevel::Good);
        marathon.sleep_hours = Some(30.0);
        assert!(matches!(
            svc.add_mood_entry(marathon).await.unwrap_err(),
            DataError::Validation(_)
        ));
    }

    // ── Summaries ───────────────────────────────────────────────────

    #[tokio::test]
    async fn summary_over_a_live_history() {
        let svc = MoodService::new(Arc::new(MemoryStore::new()));
        svc.add_mood_entry(NewMoodEntry::new("usr_1", MoodLevel::VeryGood))
            .await
            .unwrap();
        svc.add_mood_entry(NewMoodEntry::new("usr_1", MoodLevel::Low))
            .await
            .unwrap();

        let history = svc.get_user_mood_entries("usr_1", None).await;
        let summary = MoodSummary::from_entries(&history);
        assert_eq!(summary.entry_count, 2);
        assert_eq!(summary.average_mood_score, Some(3.5));
        assert_eq!(summary.average_energy, None);
    }
}
