use crate::{DEFAULT_USERNAME_PREFIX, UsernameSeed};

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn given_default_seed_when_generated_then_has_player_prefix() {
    let seed = UsernameSeed::default();
    let name = seed.generate();

    assert_eq!(seed.prefix(), DEFAULT_USERNAME_PREFIX);
    assert!(name.starts_with("Player"));
    assert!(seed.matches(&name), "{name} should match the generated shape");
}

#[test]
fn given_blank_prefix_when_created_then_validation_error() {
    assert!(UsernameSeed::new("   ").is_err());
}

#[test]
fn given_foreign_names_when_matched_then_rejected() {
    let seed = UsernameSeed::default();

    assert!(!seed.matches("Player"));
    assert!(!seed.matches("Player10000"));
    assert!(!seed.matches("Player-1"));
    assert!(!seed.matches("Gamer12"));
    assert!(seed.matches("Player0"));
    assert!(seed.matches("Player9999"));
}

proptest! {
    #[test]
    fn given_any_rng_state_when_generated_then_suffix_below_bound(state in any::<u64>()) {
        let seed = UsernameSeed::new("Guest").unwrap();
        let mut rng = StdRng::seed_from_u64(state);
        let name = seed.generate_with(&mut rng);

        prop_assert!(seed.matches(&name), "{} out of shape", name);
    }
}
