//! Progression spending, score reporting, leaderboards, and the loot
//! economy against the in-memory stores.

use arena_runtime::{
    Arena, ArenaError, Cosmetic, ErrorKind, LeaderboardMode, Principal, StoreSet,
};

fn principal(external_id: u64) -> Principal {
    Principal {
        external_id,
        username: Some(format!("pilot{external_id}")),
        ..Principal::default()
    }
}

#[tokio::test]
async fn upgrade_spends_skill_points_one_by_one() {
    let stores = StoreSet::in_memory();
    let arena = Arena::builder().stores(stores.clone()).build().await;
    let handle = arena.handle();
    let me = principal(1);

    // a fresh account has nothing to spend
    let err = handle.upgrade(me.clone(), "str").await.unwrap_err();
    assert!(matches!(err, ArenaError::NoSkillPoints));
    assert_eq!(err.kind(), ErrorKind::PreconditionFailed);

    let mut user = stores.users.ensure(&me).unwrap();
    user.progression.skill_points = 2;
    stores.users.put(&user).unwrap();

    let allocation = handle.upgrade(me.clone(), "str").await.unwrap();
    assert_eq!(allocation.stats.strength, 6);
    assert_eq!(allocation.skill_points, 1);

    // full spellings and any casing parse too
    let allocation = handle.upgrade(me.clone(), "Agility").await.unwrap();
    assert_eq!(allocation.stats.agility, 6);
    assert_eq!(allocation.skill_points, 0);

    let err = handle.upgrade(me.clone(), "luck").await.unwrap_err();
    assert!(matches!(err, ArenaError::UnknownStat(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = handle.upgrade(me, "int").await.unwrap_err();
    assert!(matches!(err, ArenaError::NoSkillPoints));
}

#[tokio::test]
async fn arcade_score_keeps_the_high_water_mark() {
    let arena = Arena::builder().build().await;
    let handle = arena.handle();
    let me = principal(2);

    assert_eq!(handle.submit_score(me.clone(), 50).await.unwrap(), 50);
    assert_eq!(handle.submit_score(me.clone(), 30).await.unwrap(), 50);
    assert_eq!(handle.submit_score(me.clone(), 80).await.unwrap(), 80);

    let profile = handle.profile(me).await.unwrap();
    assert_eq!(profile.arcade_score, 80);
    // the battle-fed score is a separate counter and stays untouched
    assert_eq!(profile.battle_score, 0);
}

#[tokio::test]
async fn leaderboard_ranks_by_mode_and_caps_rows() {
    let stores = StoreSet::in_memory();
    let arena = Arena::builder().stores(stores.clone()).build().await;
    let handle = arena.handle();

    for i in 1..=55u64 {
        let mut user = stores.users.ensure(&principal(i)).unwrap();
        user.arcade_score = i * 10;
        user.rating = 2000 - i as i32;
        stores.users.put(&user).unwrap();
    }

    let by_score = handle.leaderboard(LeaderboardMode::Score).await.unwrap();
    assert_eq!(by_score.len(), 50);
    assert_eq!(by_score[0].arcade_score, 550);
    assert!(
        by_score
            .windows(2)
            .all(|pair| pair[0].arcade_score >= pair[1].arcade_score)
    );

    let by_rating = handle.leaderboard(LeaderboardMode::Rating).await.unwrap();
    assert_eq!(by_rating.len(), 50);
    assert_eq!(by_rating[0].rating, 1999);
    assert!(
        by_rating
            .windows(2)
            .all(|pair| pair[0].rating >= pair[1].rating)
    );

    // the legacy mode name still parses
    assert_eq!("elo".parse::<LeaderboardMode>().unwrap(), LeaderboardMode::Rating);
    assert_eq!("SCORE".parse::<LeaderboardMode>().unwrap(), LeaderboardMode::Score);
}

#[tokio::test]
async fn loot_crates_need_keys_and_stack_items() {
    let arena = Arena::builder().build().await;
    let handle = arena.handle();
    let me = principal(4);

    let err = handle.open_crate(me.clone()).await.unwrap_err();
    assert!(matches!(err, ArenaError::NoKeys));
    assert_eq!(err.kind(), ErrorKind::PreconditionFailed);

    for expected in 1..=4u32 {
        let purchase = handle.buy_key(me.clone()).await.unwrap();
        assert_eq!(purchase.crate_keys, expected);
    }

    let mut opened = Vec::new();
    for remaining in (0..4u32).rev() {
        let opening = handle.open_crate(me.clone()).await.unwrap();
        assert_eq!(opening.crate_keys, remaining);
        opened.push(opening.gained);
    }

    let inventory = handle.inventory(me.clone()).await.unwrap();
    assert_eq!(inventory.crate_keys, 0);
    let total: u32 = inventory.items.iter().map(|entry| entry.quantity).sum();
    assert_eq!(total, 4, "every draw landed in the inventory");
    for entry in &inventory.items {
        assert!(matches!(
            entry.item,
            Cosmetic::CrimsonShell | Cosmetic::AzureShell | Cosmetic::GildedShell
        ));
        assert_eq!(
            entry.quantity,
            opened.iter().filter(|item| **item == entry.item).count() as u32,
            "stacked quantities match the draws"
        );
    }

    let err = handle.open_crate(me).await.unwrap_err();
    assert!(matches!(err, ArenaError::NoKeys));
}

#[tokio::test]
async fn battle_history_is_capped_newest_first() {
    let stores = StoreSet::in_memory();
    let arena = Arena::builder().stores(stores.clone()).build().await;
    let handle = arena.handle();
    let me = principal(6);

    let mut user = stores.users.ensure(&me).unwrap();
    user.energy = 40;
    stores.users.put(&user).unwrap();

    for _ in 0..32 {
        let brief = handle.start_battle(me.clone()).await.unwrap();
        handle
            .resolve_battle(me.clone(), brief.match_id, vec!["strike".into()])
            .await
            .unwrap();
    }

    let history = handle.history(me.clone()).await.unwrap();
    assert_eq!(history.len(), 30, "history keeps the most recent 30");
    assert!(
        history.windows(2).all(|pair| pair[0].at >= pair[1].at),
        "entries are ordered newest first"
    );
    assert_eq!(handle.profile(me).await.unwrap().energy, 8);
}

#[tokio::test]
async fn near_threshold_battle_levels_up() {
    let stores = StoreSet::in_memory();
    let arena = Arena::builder().stores(stores.clone()).build().await;
    let handle = arena.handle();
    let me = principal(8);

    let mut user = stores.users.ensure(&me).unwrap();
    user.progression.experience = 95;
    stores.users.put(&user).unwrap();

    // every result grants at least 8 XP, so 95 XP always crosses the
    // 100-point threshold and never reaches the 200-point one
    let brief = handle.start_battle(me.clone()).await.unwrap();
    let report = handle
        .resolve_battle(me.clone(), brief.match_id, vec![])
        .await
        .unwrap();
    assert_eq!(report.level, 2);
    assert_eq!(report.skill_points, 2);

    let profile = handle.profile(me).await.unwrap();
    assert_eq!(profile.level, 2);
    assert_eq!(profile.experience, 95 + report.xp_gain - 100);
    assert_eq!(profile.skill_points, 2);
}
