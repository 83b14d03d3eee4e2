use rand::rngs::mock::StepRng;
use rand::{Error, RngCore};
use santa_core::{Participant, RngHandle, Roster};
use santa_engine::{generate, AssignmentEngine, AttemptOutcome, DeferralLimit, InfeasibleSignal};
use santa_graph::ConstraintGraph;

struct UntouchableRng;

impl RngCore for UntouchableRng {
    fn next_u32(&mut self) -> u32 {
        panic!("randomness used before input validation")
    }

    fn next_u64(&mut self) -> u64 {
        panic!("randomness used before input validation")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("randomness used before input validation")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), Error> {
        panic!("randomness used before input validation")
    }
}

fn names(givees: &[Participant]) -> Vec<&str> {
    givees.iter().map(Participant::as_str).collect()
}

#[test]
fn too_few_participants_fail_before_drawing() {
    let constraints = ConstraintGraph::empty();
    let roster = Roster::new(["A", "B"]).unwrap();
    let err = generate(&roster, 2, &constraints, &mut UntouchableRng).unwrap_err();
    assert!(err.is_insufficient_participants());

    let single = Roster::new(["A"]).unwrap();
    let err = generate(&single, 1, &constraints, &mut UntouchableRng).unwrap_err();
    assert!(err.is_insufficient_participants());

    let err = generate(&roster, 0, &constraints, &mut UntouchableRng).unwrap_err();
    assert_eq!(err.code(), "invalid-gift-count");
}

#[test]
fn two_people_one_gift_is_the_boundary_case() {
    let roster = Roster::new(["A", "B"]).unwrap();
    let constraints = ConstraintGraph::empty();
    for seed in 0..32 {
        let outcome = generate(&roster, 1, &constraints, &mut RngHandle::from_seed(seed)).unwrap();
        let assignment = outcome.into_assignment().expect("two people always pair up");
        assert_eq!(names(assignment.givees_of("A").unwrap()), ["B"]);
        assert_eq!(names(assignment.givees_of("B").unwrap()), ["A"]);
    }
}

#[test]
fn zero_stepped_rng_gives_a_known_draw() {
    // An all-zero source makes the shuffle rotate the roster to B, C, D, A.
    let roster = Roster::new(["A", "B", "C", "D"]).unwrap();
    let constraints = ConstraintGraph::empty();
    let outcome = generate(&roster, 1, &constraints, &mut StepRng::new(0, 0)).unwrap();
    let assignment = outcome.assignment().expect("draw succeeds");

    let order: Vec<&str> = assignment.iter().map(|(giver, _)| giver.as_str()).collect();
    assert_eq!(order, ["A", "B", "C", "D"]);
    assert_eq!(names(assignment.givees_of("A").unwrap()), ["D"]);
    assert_eq!(names(assignment.givees_of("B").unwrap()), ["C"]);
    assert_eq!(names(assignment.givees_of("C").unwrap()), ["B"]);
    assert_eq!(names(assignment.givees_of("D").unwrap()), ["A"]);
}

#[test]
fn same_seed_same_attempt() {
    let roster = Roster::new(["Alexa", "Ben", "Bremmy", "Calvin", "Chelsea", "Eric"]).unwrap();
    let constraints = ConstraintGraph::build([("Calvin", "Alexa")]);
    for seed in 0..16 {
        let a = generate(&roster, 2, &constraints, &mut RngHandle::from_seed(seed)).unwrap();
        let b = generate(&roster, 2, &constraints, &mut RngHandle::from_seed(seed)).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn isolated_giver_abandons_with_a_signal() {
    let roster = Roster::new(["A", "B", "C"]).unwrap();
    let constraints = ConstraintGraph::build([("A", "B"), ("A", "C")]);
    let expected = InfeasibleSignal {
        giver: Participant::from("A"),
        slot: 0,
        deferrals: 3,
        remaining: 2,
        completed_givers: 0,
    };
    for seed in 0..8 {
        let outcome = generate(&roster, 1, &constraints, &mut RngHandle::from_seed(seed)).unwrap();
        assert_eq!(outcome, AttemptOutcome::Infeasible(expected.clone()));
    }

    let engine = AssignmentEngine::with_deferral_limit(DeferralLimit::Fixed { max: 5 });
    let outcome = engine
        .generate(&roster, 1, &constraints, &mut RngHandle::from_seed(1))
        .unwrap();
    match outcome {
        AttemptOutcome::Infeasible(signal) => {
            assert_eq!(signal.deferrals, 6);
            assert_eq!(signal.remaining, 2);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn excluded_pair_never_appears_in_a_draw() {
    let roster = Roster::new(["A", "B", "C", "D"]).unwrap();
    let constraints = ConstraintGraph::build([("A", "B")]);
    let mut successes = 0;
    for seed in 0..200 {
        let outcome = generate(&roster, 1, &constraints, &mut RngHandle::from_seed(seed)).unwrap();
        if let Some(assignment) = outcome.assignment() {
            successes += 1;
            assert!(!assignment.gives_to("A", "B"));
            assert!(!assignment.gives_to("B", "A"));
            assignment.validate(&roster, 1, &constraints).unwrap();
        }
    }
    assert!(successes > 0);
}

#[test]
fn every_attempt_satisfies_the_invariants() {
    let roster = Roster::new([
        "Alexa", "Ben", "Bremmy", "Calvin", "Chelsea", "Eric", "Janis", "John", "Kate", "Kathryn",
        "Katharina", "Ryan", "Sandra",
    ])
    .unwrap();
    let constraints = ConstraintGraph::build([
        ("Calvin", "Janis"),
        ("Kate", "Sandra"),
        ("Chelsea", "Ryan"),
        ("Eric", "Katharina"),
    ]);
    for gifts in 1..=3 {
        for seed in 0..50 {
            let outcome =
                generate(&roster, gifts, &constraints, &mut RngHandle::from_seed(seed)).unwrap();
            let Some(assignment) = outcome.assignment() else {
                continue;
            };
            assert_eq!(assignment.len(), roster.len());
            for (giver, givees) in assignment.iter() {
                assert_eq!(givees.len(), gifts);
                assert!(!givees.contains(giver));
                for (idx, givee) in givees.iter().enumerate() {
                    assert!(!givees[..idx].contains(givee));
                    assert!(!constraints.forbidden(giver, givee));
                }
            }
            let counts = assignment.received_counts();
            assert!(roster.iter().all(|p| counts.get(p) == Some(&gifts)));
        }
    }
}
