//! Aggregate column and summary tests
//!
//! Cover the denormalized column recompute, the two summary paths and
//! their agreement, cache behavior, and the relationship read paths.

use integration_tests::{user, Article, Post, TestEnv};
use reactions_common::SummaryCacheConfig;
use reactions_core::{DomainError, UserId};
use reactions_service::{ReactableService, ReactionService, ServiceError};

const POST_ID: i64 = 10;

async fn cast_votes(env: &TestEnv, values: &[f64]) {
    let service = ReactionService::new(&env.ctx);
    for (i, value) in values.iter().enumerate() {
        service
            .react::<Post>(POST_ID, "vote", Some(*value), Some(UserId::new(i as i64 + 1)))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_vote_sum_column_recomputed() {
    let env = TestEnv::new();
    cast_votes(&env, &[1.0, 2.0, 3.0, 4.0]).await;

    assert_eq!(env.column_of::<Post>("vote_sum", POST_ID), Some(Some(10.0)));
}

#[tokio::test]
async fn test_rating_avg_column_recomputed() {
    let env = TestEnv::new();
    let service = ReactionService::new(&env.ctx);
    for (i, value) in [4.0, 5.0].iter().enumerate() {
        service
            .react::<Post>(POST_ID, "rating", Some(*value), Some(UserId::new(i as i64 + 1)))
            .await
            .unwrap();
    }

    assert_eq!(env.column_of::<Post>("rating_avg", POST_ID), Some(Some(4.5)));
}

#[tokio::test]
async fn test_sum_column_collapses_to_zero_when_empty() {
    let env = TestEnv::new();
    let service = ReactionService::new(&env.ctx);
    let user = Some(UserId::new(1));

    service.react::<Post>(POST_ID, "vote", Some(3.0), user).await.unwrap();
    service.remove_reaction::<Post>(POST_ID, user).await.unwrap();

    assert_eq!(env.column_of::<Post>("vote_sum", POST_ID), Some(Some(0.0)));
}

#[tokio::test]
async fn test_avg_column_is_null_when_empty() {
    let env = TestEnv::new();
    let service = ReactionService::new(&env.ctx);
    let user = Some(UserId::new(1));

    service.react::<Post>(POST_ID, "rating", Some(4.0), user).await.unwrap();
    service.remove_reaction::<Post>(POST_ID, user).await.unwrap();

    assert_eq!(env.column_of::<Post>("rating_avg", POST_ID), Some(None));
}

#[tokio::test]
async fn test_disabled_rule_maintains_no_column() {
    let env = TestEnv::new();
    let service = ReactionService::new(&env.ctx);

    service
        .react::<Article>(7, "like", None, Some(UserId::new(1)))
        .await
        .unwrap();

    // Article's "like" rule is disabled; nothing is ever written
    assert_eq!(env.column_of::<Article>("like_sum", 7), None);
}

#[tokio::test]
async fn test_summary_mixes_configured_and_fallback_types() {
    let env = TestEnv::new();
    cast_votes(&env, &[1.0, 2.0, 3.0, 4.0]).await;

    let service = ReactionService::new(&env.ctx);
    service.react::<Post>(POST_ID, "like", None, Some(UserId::new(1))).await.unwrap();
    service.react::<Post>(POST_ID, "like", None, Some(UserId::new(2))).await.unwrap();

    let summary = ReactableService::new(&env.ctx)
        .reaction_summary::<Post>(POST_ID)
        .await
        .unwrap();

    // "vote" sums its values, unconfigured "like" counts rows
    assert_eq!(summary.get("vote"), Some(&10.0));
    assert_eq!(summary.get("like"), Some(&2.0));
    assert_eq!(summary.len(), 2);
}

#[tokio::test]
async fn test_summary_avg() {
    let env = TestEnv::new();
    let service = ReactionService::new(&env.ctx);
    for (i, value) in [1.0, 2.0, 3.0, 4.0].iter().enumerate() {
        service
            .react::<Post>(POST_ID, "rating", Some(*value), Some(UserId::new(i as i64 + 1)))
            .await
            .unwrap();
    }

    let summary = ReactableService::new(&env.ctx)
        .reaction_summary::<Post>(POST_ID)
        .await
        .unwrap();

    assert_eq!(summary.get("rating"), Some(&2.5));
}

#[tokio::test]
async fn test_summary_paths_agree() {
    let env = TestEnv::new();
    cast_votes(&env, &[1.0, 2.0, 3.0, 4.0]).await;

    let service = ReactionService::new(&env.ctx);
    service.react::<Post>(POST_ID, "like", None, Some(UserId::new(5))).await.unwrap();

    let reads = ReactableService::new(&env.ctx);
    let query = reads.reaction_summary::<Post>(POST_ID).await.unwrap();
    let loaded = reads.reaction_summary_loaded::<Post>(POST_ID).await.unwrap();

    assert_eq!(query, loaded);
}

#[tokio::test]
async fn test_summary_of_unreacted_entity_is_empty() {
    let env = TestEnv::new();

    let summary = ReactableService::new(&env.ctx)
        .reaction_summary::<Post>(99)
        .await
        .unwrap();

    assert!(summary.is_empty());
}

#[tokio::test]
async fn test_summary_is_stale_within_ttl() {
    let env = TestEnv::new();
    cast_votes(&env, &[1.0, 2.0]).await;

    let reads = ReactableService::new(&env.ctx);
    let first = reads.reaction_summary::<Post>(POST_ID).await.unwrap();
    assert_eq!(first.get("vote"), Some(&3.0));

    // Nothing invalidates the cached entry on write
    ReactionService::new(&env.ctx)
        .react::<Post>(POST_ID, "vote", Some(4.0), Some(UserId::new(3)))
        .await
        .unwrap();

    let second = reads.reaction_summary::<Post>(POST_ID).await.unwrap();
    assert_eq!(second.get("vote"), Some(&3.0));
}

#[tokio::test]
async fn test_summary_refreshes_after_ttl_expiry() {
    let config = SummaryCacheConfig {
        ttl_seconds: 1,
        ..SummaryCacheConfig::default()
    };
    let env = TestEnv::with_cache_config(config);
    cast_votes(&env, &[1.0, 2.0]).await;

    let reads = ReactableService::new(&env.ctx);
    assert_eq!(
        reads.reaction_summary::<Post>(POST_ID).await.unwrap().get("vote"),
        Some(&3.0)
    );

    ReactionService::new(&env.ctx)
        .react::<Post>(POST_ID, "vote", Some(4.0), Some(UserId::new(3)))
        .await
        .unwrap();

    // Inside the TTL the cached value still wins
    assert_eq!(
        reads.reaction_summary::<Post>(POST_ID).await.unwrap().get("vote"),
        Some(&3.0)
    );

    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    // The expired entry is dropped and the summary recomputed
    assert_eq!(
        reads.reaction_summary::<Post>(POST_ID).await.unwrap().get("vote"),
        Some(&7.0)
    );
}

#[tokio::test]
async fn test_summary_fresh_with_zero_ttl() {
    let config = SummaryCacheConfig {
        ttl_seconds: 0,
        ..SummaryCacheConfig::default()
    };
    let env = TestEnv::with_cache_config(config);
    cast_votes(&env, &[1.0, 2.0]).await;

    let reads = ReactableService::new(&env.ctx);
    assert_eq!(
        reads.reaction_summary::<Post>(POST_ID).await.unwrap().get("vote"),
        Some(&3.0)
    );

    ReactionService::new(&env.ctx)
        .react::<Post>(POST_ID, "vote", Some(4.0), Some(UserId::new(3)))
        .await
        .unwrap();

    assert_eq!(
        reads.reaction_summary::<Post>(POST_ID).await.unwrap().get("vote"),
        Some(&7.0)
    );
}

#[tokio::test]
async fn test_summary_fresh_when_cache_disabled() {
    let config = SummaryCacheConfig {
        enabled: false,
        ..SummaryCacheConfig::default()
    };
    let env = TestEnv::with_cache_config(config);
    cast_votes(&env, &[1.0, 2.0]).await;

    let reads = ReactableService::new(&env.ctx);
    reads.reaction_summary::<Post>(POST_ID).await.unwrap();

    ReactionService::new(&env.ctx)
        .react::<Post>(POST_ID, "vote", Some(4.0), Some(UserId::new(3)))
        .await
        .unwrap();

    assert_eq!(
        reads.reaction_summary::<Post>(POST_ID).await.unwrap().get("vote"),
        Some(&7.0)
    );
}

#[tokio::test]
async fn test_reactions_by_returns_users() {
    let env = TestEnv::new();
    env.users.insert(user(1));
    env.users.insert(user(2));
    env.users.insert(user(3));

    let service = ReactionService::new(&env.ctx);
    service.react::<Post>(POST_ID, "like", None, Some(UserId::new(1))).await.unwrap();
    service.react::<Post>(POST_ID, "vote", Some(1.0), Some(UserId::new(2))).await.unwrap();

    let users = ReactableService::new(&env.ctx)
        .reactions_by::<Post>(POST_ID)
        .await
        .unwrap();

    let ids: Vec<i64> = users.iter().map(|u| u.id.into_inner()).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_reacted_returns_user_reaction() {
    let env = TestEnv::new();
    let service = ReactionService::new(&env.ctx);
    let user = Some(UserId::new(1));

    service.react::<Post>(POST_ID, "like", None, user).await.unwrap();

    let reads = ReactableService::new(&env.ctx);
    let reaction = reads.reacted::<Post>(POST_ID, user).await.unwrap();
    assert_eq!(reaction.map(|r| r.reaction_type), Some("like".to_string()));

    let other = reads.reacted::<Post>(POST_ID, Some(UserId::new(2))).await.unwrap();
    assert!(other.is_none());
}

#[tokio::test]
async fn test_where_reacted_by() {
    let env = TestEnv::new();
    let service = ReactionService::new(&env.ctx);
    let user = Some(UserId::new(1));

    service.react::<Post>(10, "like", None, user).await.unwrap();
    service.react::<Post>(20, "vote", Some(1.0), user).await.unwrap();
    service.react::<Post>(30, "like", None, Some(UserId::new(2))).await.unwrap();

    let reads = ReactableService::new(&env.ctx);

    let all = reads.where_reacted_by::<Post>(user, None).await.unwrap();
    assert_eq!(all, vec![10, 20]);

    let liked = reads.where_reacted_by::<Post>(user, Some("like")).await.unwrap();
    assert_eq!(liked, vec![10]);
}

#[tokio::test]
async fn test_where_reacted_by_requires_user() {
    let env = TestEnv::new();

    let err = ReactableService::new(&env.ctx)
        .where_reacted_by::<Post>(None, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::UserNotDefined)
    ));
}

#[tokio::test]
async fn test_is_react_by_with_optional_type() {
    let env = TestEnv::new();
    let service = ReactionService::new(&env.ctx);
    let user = Some(UserId::new(1));

    service.react::<Post>(POST_ID, "vote", Some(2.0), user).await.unwrap();

    let reads = ReactableService::new(&env.ctx);
    assert!(reads.is_react_by::<Post>(POST_ID, user, None).await.unwrap());
    assert!(reads.is_react_by::<Post>(POST_ID, user, Some("vote")).await.unwrap());
    assert!(!reads.is_react_by::<Post>(POST_ID, user, Some("like")).await.unwrap());
    assert!(!reads
        .is_react_by::<Post>(POST_ID, Some(UserId::new(2)), None)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_reactions_lists_rows() {
    let env = TestEnv::new();
    let service = ReactionService::new(&env.ctx);

    service.react::<Post>(POST_ID, "like", None, Some(UserId::new(1))).await.unwrap();
    service.react::<Post>(POST_ID, "like", None, Some(UserId::new(2))).await.unwrap();

    let reactions = ReactableService::new(&env.ctx)
        .reactions::<Post>(POST_ID)
        .await
        .unwrap();

    assert_eq!(reactions.len(), 2);
    assert!(reactions.iter().all(|r| r.reaction_type == "like"));
}
