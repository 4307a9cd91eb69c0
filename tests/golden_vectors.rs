//! Known-answer tests for complete machines.
//!
//! The first Enigma I case and the Hiawatha case are widely published
//! reference outputs; the others are frozen snapshots. Each case also
//! decrypts its own output to check the substitution is self-reciprocal.

use enigma::{Machine, MachineConfig, Setup};
use rstest::rstest;

const ENIGMA_I: &str = include_str!("../configs/enigma_i.conf");
const DEFAULT: &str = include_str!("../configs/default.conf");

fn machine(config: &str, setup: &str) -> Machine {
    let config = MachineConfig::parse(config).unwrap();
    let mut machine = config.build_machine().unwrap();
    machine.apply_setup(&Setup::parse(setup).unwrap()).unwrap();
    machine
}

// ═══════════════════════════════════════════════════════════════════════
// Enigma I: wide reflectors, three moving rotors
// ═══════════════════════════════════════════════════════════════════════

/// Reflector B, rotors I II III at AAA, no plugboard, 25 × `A`.
#[test]
fn enigma_i_twenty_five_a() {
    let mut m = machine(ENIGMA_I, "* UKW-B I II III AAA");
    let cipher = m.convert_str(&"A".repeat(25)).unwrap();
    assert_eq!(cipher, "BDZGOWCXLTKSBTMCDLPBMUQOF");
    assert_eq!(m.positions(), "ABZ");
}

#[rstest]
#[case::hello_world("* UKW-B I II III AAA", "HELLOWORLD", "ILBDAAMTAZ")]
#[case::plugboard_ten_pairs(
    "* UKW-B II IV V BLA (AV) (BS) (CG) (DL) (FU) (HZ) (IN) (KM) (OW) (RX)",
    "ATTACKATDAWNSTOPREINFORCEMENTSARRIVEFROMTHENORTH",
    "WACPZNVQHVLTIRAOWIXGBRITBVGXQZIVZXUPAQTBOWMAXOLZ"
)]
#[case::reflector_c("* UKW-C V I III XQE (EZ) (RW)", "ENIGMAREVEALED", "TXSDOJGVBIBCLW")]
fn enigma_i_vectors(#[case] setup: &str, #[case] plain: &str, #[case] cipher: &str) {
    let mut m = machine(ENIGMA_I, setup);
    assert_eq!(m.convert_str(plain).unwrap(), cipher);

    let mut m = machine(ENIGMA_I, setup);
    assert_eq!(m.convert_str(cipher).unwrap(), plain);
}

// ═══════════════════════════════════════════════════════════════════════
// Five-slot machines: thin reflector, fixed rotor, three moving rotors
// ═══════════════════════════════════════════════════════════════════════

#[rstest]
#[case::hiawatha(
    "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)",
    "FROMHISSHOULDERHIAWATHA",
    "QVPQSOKOILPUBKJZPISFXDW"
)]
#[case::gamma(
    "* C Gamma V II IV QEZV (AB) (CD)",
    "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG",
    "RXGOGWXVOVZVSBJVHDFQJFYUWEVBEZVOFCU"
)]
fn five_slot_vectors(#[case] setup: &str, #[case] plain: &str, #[case] cipher: &str) {
    let mut m = machine(DEFAULT, setup);
    assert_eq!(m.convert_str(plain).unwrap(), cipher);

    let mut m = machine(DEFAULT, setup);
    assert_eq!(m.convert_str(cipher).unwrap(), plain);
}

/// The fixed rotor keeps its position however long the message.
#[test]
fn fixed_rotor_never_moves() {
    let mut m = machine(DEFAULT, "* B Beta III IV I AXLE");
    m.convert_str(&"QWERTY".repeat(500)).unwrap();
    assert!(m.positions().starts_with('A'));
}

// ═══════════════════════════════════════════════════════════════════════
// Determinism
// ═══════════════════════════════════════════════════════════════════════

/// Identical configuration and input give identical output on every run.
#[test]
fn repeated_runs_agree() {
    let plain = "WETTERVORHERSAGEBISKAYA".repeat(20);
    let reference = machine(DEFAULT, "* B Beta I II III ZZZZ (AZ) (QP)")
        .convert_str(&plain)
        .unwrap();
    for _ in 0..5 {
        let mut m = machine(DEFAULT, "* B Beta I II III ZZZZ (AZ) (QP)");
        assert_eq!(m.convert_str(&plain).unwrap(), reference);
    }
}
