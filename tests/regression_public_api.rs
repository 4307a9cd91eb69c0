//! Regression tests for the public API.
//!
//! Exercises the exported types the way a driver uses them: building
//! machines by hand and from configuration text, error classification,
//! independent machines over one catalog, and the line-oriented session.

use std::sync::Arc;
use std::thread;

use enigma::message::{group_symbols, GROUP_SIZE};
use enigma::{
    Alphabet, EnigmaError, ErrorKind, Machine, MachineConfig, Permutation, RotorBlueprint,
    RotorCatalog, RotorKind, Session, Setup,
};

const DEFAULT: &str = include_str!("../configs/default.conf");

// ═══════════════════════════════════════════════════════════════════════
// Permutation and Rotor properties
// ═══════════════════════════════════════════════════════════════════════

/// `invert` undoes `permute` for every rotor wiring in the default catalog.
#[test]
fn permutation_round_trip_for_catalog() {
    let config = MachineConfig::parse(DEFAULT).unwrap();
    let catalog = config.catalog();
    for name in catalog.names() {
        let blueprint = catalog.get(catalog.id_of(name).unwrap()).unwrap();
        let perm = blueprint.permutation();
        for i in 0..perm.size() {
            assert_eq!(perm.invert(perm.permute(i)), i, "rotor {}", name);
            assert_eq!(perm.permute(perm.invert(i)), i, "rotor {}", name);
        }
    }
}

/// Every reflector in the default catalog pairs up all symbols.
#[test]
fn reflectors_are_involutive_derangements() {
    let config = MachineConfig::parse(DEFAULT).unwrap();
    let catalog = config.catalog();
    for name in ["B", "C"] {
        let blueprint = catalog.get(catalog.id_of(name).unwrap()).unwrap();
        assert_eq!(blueprint.kind(), RotorKind::Reflector);
        assert!(blueprint.permutation().is_involution());
        assert!(blueprint.permutation().is_derangement());
    }
}

/// `convert_backward` undoes `convert_forward` at every setting.
#[test]
fn rotor_backward_undoes_forward() {
    let config = MachineConfig::parse(DEFAULT).unwrap();
    for name in ["I", "VI", "Beta"] {
        let mut rotor = config.catalog().instantiate(name).unwrap();
        for setting in 0..26 {
            rotor.set(setting).unwrap();
            for p in 0..26 {
                assert_eq!(rotor.convert_backward(rotor.convert_forward(p)).unwrap(), p);
            }
        }
    }
}

/// Rotors VI to VIII carry two notches.
#[test]
fn two_notch_rotor_carries_twice_per_turn() {
    let config = MachineConfig::parse(DEFAULT).unwrap();
    let mut m = config.build_machine().unwrap();
    m.insert_rotors(["B", "Beta", "I", "II", "VI"]).unwrap();
    m.set_rotor_positions("AAAA").unwrap();
    for _ in 0..26 {
        m.step();
    }
    // One full turn of VI passes both M and Z.
    assert_eq!(m.positions(), "AACA");
}

// ═══════════════════════════════════════════════════════════════════════
// Building a machine by hand
// ═══════════════════════════════════════════════════════════════════════

/// A tiny four-symbol machine built without configuration text.
#[test]
fn hand_built_machine_is_self_reciprocal() {
    let alpha = Arc::new(Alphabet::new("ABCD").unwrap());
    let wiring = |c: &str| Arc::new(Permutation::new(c, alpha.clone()).unwrap());

    let mut catalog = RotorCatalog::new(alpha.clone());
    catalog
        .add(RotorBlueprint::reflector("R", wiring("(AC)(BD)")))
        .unwrap();
    catalog
        .add(RotorBlueprint::moving("X", wiring("(ABD)"), "C").unwrap())
        .unwrap();
    catalog
        .add(RotorBlueprint::moving("Y", wiring("(BCD)"), "A").unwrap())
        .unwrap();

    let mut m = Machine::new(alpha.clone(), 3, 2, Arc::new(catalog)).unwrap();
    m.insert_rotors(["R", "X", "Y"]).unwrap();
    m.set_plugboard(Permutation::new("(AB)", alpha).unwrap())
        .unwrap();

    m.set_rotor_positions("BC").unwrap();
    let cipher = m.convert_str("ABCDDCBAABCD").unwrap();
    m.set_rotor_positions("BC").unwrap();
    assert_eq!(m.convert_str(&cipher).unwrap(), "ABCDDCBAABCD");
}

// ═══════════════════════════════════════════════════════════════════════
// Error classification
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn configuration_errors_are_classified() {
    let config = MachineConfig::parse(DEFAULT).unwrap();
    let mut m = config.build_machine().unwrap();

    let errors = [
        Alphabet::new("AA").unwrap_err(),
        MachineConfig::parse("AB\n2").unwrap_err(),
        m.insert_rotors(["B", "Beta", "III", "IV"]).unwrap_err(),
        m.insert_rotors(["Beta", "B", "III", "IV", "I"]).unwrap_err(),
        m.insert_rotors(["B", "Beta", "III", "IV", "XI"]).unwrap_err(),
        m.set_plugboard(Permutation::new("(ABC)", config.alphabet().clone()).unwrap())
            .unwrap_err(),
    ];
    for err in errors {
        assert_eq!(err.kind(), ErrorKind::Configuration, "{}", err);
    }

    m.insert_rotors(["B", "Beta", "III", "IV", "I"]).unwrap();
    let err = m.set_rotor_positions("AAA").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn operational_errors_are_classified() {
    let config = MachineConfig::parse(DEFAULT).unwrap();
    let mut m = config.build_machine().unwrap();

    assert!(matches!(m.convert(0), Err(EnigmaError::NoRotors)));

    m.insert_rotors(["B", "Beta", "III", "IV", "I"]).unwrap();
    let errors = [
        m.convert(26).unwrap_err(),
        m.convert_str("abc").unwrap_err(),
        m.set_rotor_positions("AA1A").unwrap_err(),
        m.rotors()[0].convert_backward(0).unwrap_err(),
    ];
    for err in errors {
        assert_eq!(err.kind(), ErrorKind::Operational, "{}", err);
    }
    assert_eq!(m.positions(), "AAAA");
}

// ═══════════════════════════════════════════════════════════════════════
// Independent machines over one catalog
// ═══════════════════════════════════════════════════════════════════════

/// Two machines selecting the same rotors do not disturb each other.
#[test]
fn machines_share_wiring_not_state() {
    let config = MachineConfig::parse(DEFAULT).unwrap();
    let mut a = config.build_machine().unwrap();
    let mut b = config.build_machine().unwrap();
    for m in [&mut a, &mut b] {
        m.insert_rotors(["B", "Beta", "III", "IV", "I"]).unwrap();
        m.set_rotor_positions("AXLE").unwrap();
    }

    a.convert_str("ABCDEFGHIJ").unwrap();
    assert_eq!(a.positions(), "AXLO");
    assert_eq!(b.positions(), "AXLE");
    assert!(Arc::ptr_eq(
        a.rotors()[4].blueprint(),
        b.rotors()[4].blueprint()
    ));
}

/// Machines moved to separate threads produce the same stream as one
/// machine run on the calling thread.
#[test]
fn machines_run_on_separate_threads() {
    let config = MachineConfig::parse(DEFAULT).unwrap();
    let setup = Setup::parse("* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)").unwrap();
    let plain = "FROMHISSHOULDERHIAWATHA".repeat(10);

    let mut local = config.build_machine().unwrap();
    local.apply_setup(&setup).unwrap();
    let expected = local.convert_str(&plain).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let mut m = config.build_machine().unwrap();
            let setup = setup.clone();
            let plain = plain.clone();
            thread::spawn(move || {
                m.apply_setup(&setup).unwrap();
                m.convert_str(&plain).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
    assert!(expected.starts_with("QVPQSOKOILPUBKJZPISFXDW"));
}

/// Plugboard cycles written with inner spaces select the same pairs.
#[test]
fn spaced_plugboard_cycles_match_compact_ones() {
    let config = MachineConfig::parse(DEFAULT).unwrap();
    let mut session = Session::new(config.build_machine().unwrap());
    session
        .process_line("* B Beta III IV I AXLE (H Q) (E X) (I P) (T R) (B Y)")
        .unwrap();
    assert_eq!(
        session.process_line("FROMHISSHOULDERHIAWATHA").unwrap().as_deref(),
        Some("QVPQS OKOIL PUBKJ ZPISF XDW")
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Session
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn session_processes_message_stream() {
    let config = MachineConfig::parse(DEFAULT).unwrap();
    let mut session = Session::new(config.build_machine().unwrap());
    let input = "\
* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)
FROM his shoulder Hiawatha

* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)
QVPQS OKOIL PUBKJ ZPISF XDW
";
    let mut out = Vec::new();
    session.process(input.as_bytes(), &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "QVPQS OKOIL PUBKJ ZPISF XDW\n\nFROMH ISSHO ULDER HIAWA THA\n"
    );
}

#[test]
fn session_rejects_message_without_setup() {
    let config = MachineConfig::parse(DEFAULT).unwrap();
    let mut session = Session::new(config.build_machine().unwrap());
    let mut out = Vec::new();
    let err = session
        .process("HELLO\n".as_bytes(), &mut out)
        .unwrap_err();
    assert!(matches!(err, EnigmaError::MissingSetup));
}

#[test]
fn groups_are_five_wide() {
    assert_eq!(GROUP_SIZE, 5);
    assert_eq!(group_symbols("ABCDEFGHIJK", GROUP_SIZE), "ABCDE FGHIJ K");
}
