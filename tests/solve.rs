use log::info;
use twophase::{
    constants::*,
    cubie::CubieCube,
    error::Error,
    facelet::FaceCube,
    scramble::{gen_scramble, scramble_to_str},
    solve, Search, SolveOptions,
};

fn random_cube() -> CubieCube {
    let mut cc = CubieCube::default();
    cc.randomize();
    cc
}

#[test_log::test]
fn test_random_states_restore() {
    let mut search = Search::new();
    for _ in 0..5 {
        let cc = random_cube();
        let solution = search
            .solve(&cc, DEFAULT_MAX_DEPTH, DEFAULT_PROBE_MAX, DEFAULT_PROBE_MIN, SolveOptions::default())
            .unwrap();
        info!("{} in {} probes", solution, search.probes());
        assert!(solution.len() <= DEFAULT_MAX_DEPTH);
        assert!(cc.apply_moves(&solution.moves).is_solved());
    }
}

#[test_log::test]
fn test_facelet_input() {
    let cc = random_cube();
    let facelets = FaceCube::from(&cc).to_string();
    let options = SolveOptions::USE_SEPARATOR | SolveOptions::APPEND_LENGTH;
    let solution = solve(&facelets, DEFAULT_MAX_DEPTH, DEFAULT_PROBE_MAX, 0, options).unwrap();
    assert!(cc.apply_moves(&solution.moves).is_solved());
    assert!(solution.to_string().ends_with(&format!("({}f)", solution.len())));
}

#[test_log::test]
fn test_inverse_regenerates_state() {
    let mut search = Search::new();
    for _ in 0..3 {
        let cc = random_cube();
        let solution = search
            .solve(&cc, DEFAULT_MAX_DEPTH, DEFAULT_PROBE_MAX, 0, SolveOptions::INVERSE_SOLUTION)
            .unwrap();
        assert_eq!(CubieCube::default().apply_moves(&solution.moves), cc);
    }
}

#[test_log::test]
fn test_next_never_longer() {
    let cc = random_cube();
    let mut search = Search::new();
    let first = search
        .solve(&cc, 25, DEFAULT_PROBE_MAX, 0, SolveOptions::default())
        .unwrap();
    let mut previous = first.len();
    for _ in 0..4 {
        match search.next(DEFAULT_PROBE_MAX, 500, SolveOptions::default()) {
            Ok(solution) => {
                assert!(solution.len() < previous);
                assert!(cc.apply_moves(&solution.moves).is_solved());
                previous = solution.len();
            }
            Err(e) => {
                assert!(matches!(e, Error::ProbeLimit | Error::NoSolution));
                break;
            }
        }
    }
}

#[test_log::test]
fn test_optimal_not_longer_than_two_phase() {
    let mut search = Search::new();
    for _ in 0..3 {
        let scramble = gen_scramble(6);
        let cc = CubieCube::from(scramble.as_slice());
        let two_phase = search
            .solve(&cc, DEFAULT_MAX_DEPTH, DEFAULT_PROBE_MAX, 0, SolveOptions::default())
            .unwrap();
        let optimal = search
            .solve(&cc, DEFAULT_MAX_DEPTH, u64::MAX, 0, SolveOptions::OPTIMAL_SOLUTION)
            .unwrap();
        info!("{}: {} / {}", scramble_to_str(&scramble), two_phase, optimal);
        assert!(optimal.len() <= two_phase.len());
        assert!(optimal.len() <= scramble.len());
        assert!(cc.apply_moves(&optimal.moves).is_solved());
    }
}

#[test_log::test]
fn test_invalid_states() {
    let facelets = |cc: &CubieCube| FaceCube::from(cc).to_string();
    let options = SolveOptions::default();
    let code = |s: &str| solve(s, 21, 1000, 0, options).unwrap_err().code();

    let mut wrong_count = SOLVED_FACELETS.to_string();
    wrong_count.replace_range(0..1, "R");
    assert_eq!(code(&wrong_count), 1);
    assert_eq!(code("UUU"), 1);

    // the R sticker of UR and the D sticker of DF swapped leaves an edge with U and D colors
    let mut missing_edge: Vec<char> = SOLVED_FACELETS.chars().collect();
    missing_edge.swap(10, 28);
    assert_eq!(code(&missing_edge.iter().collect::<String>()), 2);

    let mut cc = CubieCube::default();
    cc.eo[0] = 1;
    assert_eq!(code(&facelets(&cc)), 3);

    let mut cc = CubieCube::default();
    cc.co[0] = 1;
    assert_eq!(code(&facelets(&cc)), 5);

    let mut cc = CubieCube::default();
    cc.ep.swap(0, 1);
    assert_eq!(code(&facelets(&cc)), 6);
}

#[test_log::test]
#[ignore = "takes minutes in an optimal search"]
fn test_superflip_optimal() {
    let mut superflip = CubieCube::default();
    superflip.eo = [1; 12];
    let solution = Search::new()
        .solve(&superflip, 20, u64::MAX, 0, SolveOptions::OPTIMAL_SOLUTION)
        .unwrap();
    assert_eq!(solution.len(), 20);
    assert!(superflip.apply_moves(&solution.moves).is_solved());
}
