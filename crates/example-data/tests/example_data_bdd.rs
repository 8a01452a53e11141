//! Behavioural tests for example-data crate.
//!
//! These tests validate the crate's behaviour against Gherkin scenarios
//! covering deterministic generation and field validity.

// `expect` is idiomatic in test code for failing fast on precondition violations.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::collections::HashSet;

use example_data::{
    ExampleBankSeed, ExampleDataGenerator, ExampleUserSeed, is_valid_routing_number,
    is_valid_swift_bic, is_valid_username,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

/// Test world holding the seed and generated batches.
#[derive(Default, ScenarioState)]
struct World {
    seed: Slot<u64>,
    generated_users: Slot<Vec<ExampleUserSeed>>,
    second_generation: Slot<Vec<ExampleUserSeed>>,
    generated_banks: Slot<Vec<ExampleBankSeed>>,
}

impl World {
    fn generator(&self) -> ExampleDataGenerator {
        ExampleDataGenerator::new(self.seed.get().expect("seed should be set"))
    }

    fn users(&self) -> Vec<ExampleUserSeed> {
        self.generated_users
            .get()
            .expect("users should be generated")
    }

    fn banks(&self) -> Vec<ExampleBankSeed> {
        self.generated_banks
            .get()
            .expect("banks should be generated")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

// ============================================================================
// Given steps
// ============================================================================

#[given("a generator seeded with {seed:u64}")]
fn a_generator_seeded_with(world: &World, seed: u64) {
    world.seed.set(seed);
}

// ============================================================================
// When steps
// ============================================================================

#[when("users are generated twice from the same seed")]
fn users_are_generated_twice(world: &World) {
    let first = world.generator().users(5).expect("first generation");
    let second = world.generator().users(5).expect("second generation");
    world.generated_users.set(first);
    world.second_generation.set(second);
}

#[when("{count:usize} users are generated")]
fn users_are_generated(world: &World, count: usize) {
    let users = world.generator().users(count).expect("generation succeeds");
    world.generated_users.set(users);
}

#[when("{count:usize} banks are generated")]
fn banks_are_generated(world: &World, count: usize) {
    world.generated_banks.set(world.generator().banks(count));
}

#[when("{batches:usize} batches of {count:usize} banks are generated")]
fn batches_of_banks_are_generated(world: &World, batches: usize, count: usize) {
    let mut generator = world.generator();
    let banks = (0..batches).flat_map(|_| generator.banks(count)).collect();
    world.generated_banks.set(banks);
}

// ============================================================================
// Then steps
// ============================================================================

#[then("both generations produce identical users")]
fn both_generations_produce_identical_users(world: &World) {
    let second = world
        .second_generation
        .get()
        .expect("second generation should be set");
    assert_eq!(world.users(), second, "Generations should be deterministic");
}

#[then("all usernames satisfy validation")]
fn all_usernames_satisfy_validation(world: &World) {
    for user in world.users() {
        assert!(
            is_valid_username(&user.username),
            "Invalid username: {}",
            user.username
        );
    }
}

#[then("every email starts with its username")]
fn every_email_starts_with_its_username(world: &World) {
    for user in world.users() {
        assert!(
            user.email.starts_with(&format!("{}@", user.username)),
            "Email {} does not match username {}",
            user.email,
            user.username
        );
    }
}

#[then("every routing number has a valid check digit")]
fn every_routing_number_has_a_valid_check_digit(world: &World) {
    for bank in world.banks() {
        assert!(
            is_valid_routing_number(&bank.routing_number),
            "Invalid routing number: {}",
            bank.routing_number
        );
    }
}

#[then("every SWIFT code is well formed")]
fn every_swift_code_is_well_formed(world: &World) {
    for bank in world.banks() {
        assert!(
            is_valid_swift_bic(&bank.swift_bic),
            "Invalid SWIFT/BIC: {}",
            bank.swift_bic
        );
    }
}

#[then("all bank identifiers are distinct")]
fn all_bank_identifiers_are_distinct(world: &World) {
    let banks = world.banks();
    let ids: HashSet<_> = banks.iter().map(|bank| bank.id).collect();
    assert_eq!(ids.len(), banks.len(), "bank identifiers repeated");
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Deterministic generation produces identical users"
)]
fn deterministic_generation_produces_identical_users(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Generated usernames are valid"
)]
fn generated_usernames_are_valid(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Generated bank codes are well formed"
)]
fn generated_bank_codes_are_well_formed(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Identifiers never repeat across batches"
)]
fn identifiers_never_repeat_across_batches(world: World) {
    let _ = world;
}
