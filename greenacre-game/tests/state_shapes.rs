use greenacre_game::state::InventoryEntry;
use greenacre_game::{
    Catalog, CowOptions, GameState, PlotContent, PriceEvent, RngBundle, SimEngine,
    generate_cow, generate_value_adjustments,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn game_state_serialization_preserves_simulation_fields() {
    let engine = SimEngine::standard();
    let mut state = engine.new_game();

    state.day = 14;
    state.field.plots[4][2] = Some(PlotContent::new_crop("pumpkin"));
    state.field.plots[0][5] = Some(PlotContent::from_item_id("sprinkler"));
    state.inventory = vec![
        InventoryEntry {
            item_id: "carrot-seed".to_string(),
            quantity: 3,
        },
        InventoryEntry {
            item_id: "milk-2".to_string(),
            quantity: 1,
        },
    ];
    state.price_surges.insert(
        "carrot".to_string(),
        PriceEvent {
            item_id: "carrot".to_string(),
            days_remaining: 2,
        },
    );

    let bundle = RngBundle::from_user_seed(0xFACE_B00C);
    state.cows.push(generate_cow(
        &mut *bundle.cows(),
        &CowOptions::default(),
    ));
    state.value_adjustments = generate_value_adjustments(
        engine.catalog(),
        &state.price_crashes,
        &state.price_surges,
        &mut *bundle.market(),
    );

    let saved = serde_json::to_string(&state).unwrap();
    let restored: GameState = serde_json::from_str(&saved).unwrap();

    let original_value = serde_json::to_value(&state).unwrap();
    let restored_value = serde_json::to_value(&restored).unwrap();
    assert_eq!(original_value, restored_value, "round-trip mismatch");
    assert_eq!(restored.cows, state.cows);
    assert_eq!(restored.value_adjustments, state.value_adjustments);
}

#[test]
fn seeded_bundles_reproduce_full_day_outcomes() {
    let catalog = Catalog::standard();

    let run = |seed: u64| {
        let bundle = RngBundle::from_user_seed(seed);
        let herd: Vec<_> = (0..5)
            .map(|_| generate_cow(&mut *bundle.cows(), &CowOptions::default()))
            .collect();
        let adjustments = generate_value_adjustments(
            &catalog,
            &Default::default(),
            &Default::default(),
            &mut *bundle.market(),
        );
        (herd, adjustments)
    };

    let (herd_a, adjustments_a) = run(0xDECAF);
    let (herd_b, adjustments_b) = run(0xDECAF);
    assert_eq!(herd_a, herd_b);
    assert_eq!(adjustments_a, adjustments_b);

    let (herd_c, _) = run(0xDECAF + 1);
    assert_ne!(herd_a, herd_c, "different seeds should diverge");
}

#[test]
fn domain_streams_are_independent() {
    // Drawing cows must not perturb market fluctuation for the same seed.
    let catalog = Catalog::standard();

    let bundle_quiet = RngBundle::from_user_seed(777);
    let quiet = generate_value_adjustments(
        &catalog,
        &Default::default(),
        &Default::default(),
        &mut *bundle_quiet.market(),
    );

    let bundle_busy = RngBundle::from_user_seed(777);
    for _ in 0..50 {
        let _ = generate_cow(&mut *bundle_busy.cows(), &CowOptions::default());
    }
    let busy = generate_value_adjustments(
        &catalog,
        &Default::default(),
        &Default::default(),
        &mut *bundle_busy.market(),
    );

    assert_eq!(quiet, busy);
}

#[test]
fn chacha_seeded_generation_is_reproducible() {
    let mut a = ChaCha20Rng::seed_from_u64(31);
    let mut b = ChaCha20Rng::seed_from_u64(31);
    let first = generate_cow(&mut a, &CowOptions::default());
    let second = generate_cow(&mut b, &CowOptions::default());
    assert_eq!(first, second);
}

#[test]
fn catalog_serialization_is_stable_across_builds() {
    let first = serde_json::to_string(&Catalog::standard()).unwrap();
    let second = serde_json::to_string(&Catalog::standard()).unwrap();
    assert_eq!(first, second, "catalog ordering must be deterministic");

    let reloaded: Catalog = serde_json::from_str(&first).unwrap();
    assert_eq!(reloaded, Catalog::standard());
}
