//! Client wiring tests: construction, option validation, and the way
//! configured options reach the services.

mod client_tests {
    use std::sync::Arc;

    use chrono::{TimeDelta, Utc};
    use serenity_core::error::DataError;
    use serenity_core::models::UserRole;
    use serenity_core::options::{IdStrategy, SerenityOptions};
    use serenity_data::{NewProfile, NewSession, SerenityData};
    use serenity_memory::MemoryStore;

    #[tokio::test]
    async fn client_exposes_every_service() {
        let data = SerenityData::new(Arc::new(MemoryStore::new()));
        assert!(data.profiles().get_profile("ghost").await.is_none());
        assert!(data.sessions().get_user_sessions("ghost").await.is_empty());
        assert!(data
            .moods()
            .get_user_mood_entries("ghost", None)
            .await
            .is_empty());
        assert!(data.catalog().get_resources(None).await.is_empty());
        assert!(data.messages().get_messages("ada", "ben").await.is_empty());
        assert!(data.progress().get_user_progress("ghost", None).await.is_empty());
    }

    #[tokio::test]
    async fn services_share_one_store() {
        let data = SerenityData::new(Arc::new(MemoryStore::new()));
        data.profiles()
            .create_profile(NewProfile::new("usr_1", "ada@example.org", UserRole::User))
            .await
            .unwrap();

        let fetched = data.profiles().get_profile("usr_1").await;
        assert!(fetched.is_some());
    }

    #[test]
    fn with_options_rejects_a_bad_store_url() {
        let options = SerenityOptions::default().store_url("not a url");
        let err = SerenityData::with_options(Arc::new(MemoryStore::new()), options).unwrap_err();
        assert!(matches!(err, DataError::Config(_)));
    }

    #[test]
    fn with_options_rejects_a_zero_deadline() {
        let options = SerenityOptions::default().deadline_secs(0);
        let err = SerenityData::with_options(Arc::new(MemoryStore::new()), options).unwrap_err();
        assert!(matches!(err, DataError::Config(_)));
    }

    #[tokio::test]
    async fn with_options_accepts_the_defaults() {
        let data =
            SerenityData::with_options(Arc::new(MemoryStore::new()), SerenityOptions::default())
                .unwrap();
        assert!(data.profiles().get_profile("ghost").await.is_none());
    }

    #[tokio::test]
    async fn id_strategy_flows_into_created_rows() {
        let options = SerenityOptions::default().id_strategy(IdStrategy::Random);
        let data = SerenityData::with_options(Arc::new(MemoryStore::new()), options).unwrap();

        let session = data
            .sessions()
            .create_session(NewSession::new(
                "usr_1",
                "ther_1",
                Utc::now() + TimeDelta::hours(2),
                50,
            ))
            .await
            .unwrap();
        // nanoid ids are 21 characters; the store's own uuids are 36.
        assert_eq!(session.id.len(), 21);
    }
}
