use pcfind_core::{Field, Piece, Placement, Rotation};
use pcfind_engine::{apply_placement, Canonicalizer, SearchConfig};
use pcfind_solver::{find_perfect, search_perfect, Outcome, PerfectSolver, SearchOptions};

use Piece::*;

fn field(rows: &[&str]) -> Field {
    Field::from_pattern(23, 10, rows).unwrap()
}

fn well() -> Field {
    field(&["XXX....XXX", "XXXX...XXX", "XXXXX..XXX", "XXXX...XXX"])
}

fn replay(field: &Field, path: &[Placement]) -> Field {
    path.iter().fold(field.clone(), |current, placement| {
        assert!(current.can_place(placement.piece, placement.rotation, placement.x, placement.y));
        apply_placement(&current, placement).0
    })
}

mod fixtures {
    use super::*;

    #[test]
    fn test_order_without_hold() {
        let result = search_perfect(&well(), &[T, J, I], None, SearchOptions::default());
        assert_eq!(result, Ok(true));
    }

    #[test]
    fn test_order_with_hold() {
        let result = search_perfect(&well(), &[T, I], Some(O), SearchOptions::default());
        assert_eq!(result, Ok(true));
    }

    #[test]
    fn test_longer_order_capped() {
        let options = SearchOptions::default().with_max_placements(3);
        let result = search_perfect(&well(), &[Z, I, O, L, J, T], None, options);
        assert_eq!(result, Ok(true));
    }

    #[test]
    fn test_wide_well_with_hold() {
        let field = field(&["XXX.....XX", "XXXX....XX", "XXXXX...XX", "XXXX....XX"]);
        let options = SearchOptions::default().with_max_placements(4);
        let result = search_perfect(&field, &[J, O, S, T, I, L], Some(I), options);
        assert_eq!(result, Ok(true));
    }

    #[test]
    fn test_two_line_clear_on_empty_field() {
        let options = SearchOptions::default()
            .with_max_placements(5)
            .with_max_clear_rows(2);
        let result = search_perfect(&Field::standard(), &[I, J, O, L, T, S, Z], Some(O), options);
        assert_eq!(result, Ok(true));
    }

    #[test]
    fn test_long_sequence_with_hold() {
        let field = field(&["X.........", "XX........", "XXXXX....X", "XXXX...XXX"]);
        let result = search_perfect(&field, &[J, O, Z, O, Z, I], Some(I), SearchOptions::default());
        assert_eq!(result, Ok(true));
    }

    #[test]
    fn test_long_sequence_with_o_hold() {
        let field = field(&["XX........", "XXX.......", "XXXX...X..", "XXX....XXX"]);
        let result = search_perfect(&field, &[I, O, L, J, L, S], Some(O), SearchOptions::default());
        assert_eq!(result, Ok(true));
    }

    #[test]
    fn test_hold_already_used() {
        let field = field(&["XX....XXXX", "XXX...XXXX", "XXXX..XXXX", "XXX...XXXX"]);
        let options = SearchOptions::default().with_hold_used(true);
        let result = search_perfect(&field, &[L, I, S, Z], Some(O), options);
        assert_eq!(result, Ok(false));
    }

    #[test]
    fn test_only_i_pieces_cannot_fill_well() {
        let result = search_perfect(&well(), &[I; 10], None, SearchOptions::default());
        assert_eq!(result, Ok(false));
    }
}

mod witness {
    use super::*;

    #[test]
    fn test_witness_empties_field() {
        let cases: Vec<(Field, Vec<Piece>, Option<Piece>, SearchOptions)> = vec![
            (well(), vec![T, J, I], None, SearchOptions::default()),
            (well(), vec![T, I], Some(O), SearchOptions::default()),
            (
                Field::standard(),
                vec![I, J, O, L, T, S, Z],
                Some(O),
                SearchOptions::default().with_max_placements(5).with_max_clear_rows(2),
            ),
            (
                field(&["X.........", "XX........", "XXXXX....X", "XXXX...XXX"]),
                vec![J, O, Z, O, Z, I],
                Some(I),
                SearchOptions::default(),
            ),
        ];

        for (field, order, hold, options) in cases {
            let path = find_perfect(&field, &order, hold, options)
                .unwrap()
                .expect("fixture has a perfect clear");
            let available = order.len() + usize::from(hold.is_some());
            assert!(path.len() <= options.max_placements.unwrap_or(available));
            assert!(replay(&field, &path).is_perfect());
        }
    }

    #[test]
    fn test_witness_uses_known_pieces() {
        let path = find_perfect(&well(), &[T, I], Some(O), SearchOptions::default())
            .unwrap()
            .unwrap();
        let mut pieces: Vec<_> = path.iter().map(|p| p.piece).collect();
        pieces.sort();
        let mut known = vec![T, I, O];
        known.sort();
        assert_eq!(pieces, known);
    }
}

mod properties {
    use super::*;

    #[test]
    fn test_more_rows_never_loses_a_clear() {
        let order = [I, J, O, L, T, S, Z];
        for rows in 2..=4 {
            let options = SearchOptions::default()
                .with_max_placements(5)
                .with_max_clear_rows(rows);
            assert_eq!(
                search_perfect(&Field::standard(), &order, Some(O), options),
                Ok(true),
                "{rows} rows"
            );
        }

        for rows in 4..=6 {
            let options = SearchOptions::default().with_max_clear_rows(rows);
            assert_eq!(search_perfect(&well(), &[T, J, I], None, options), Ok(true));
        }
    }

    #[test]
    fn test_solve_agrees_with_search() {
        let mut solver = PerfectSolver::default();
        let found = solver.solve(&well(), &[T, J, I], None, SearchOptions::default());
        assert!(matches!(found, Ok(Outcome::Found(_))));

        let field = field(&["XX....XXXX", "XXX...XXXX", "XXXX..XXXX", "XXX...XXXX"]);
        let options = SearchOptions::default().with_hold_used(true);
        assert_eq!(
            solver.solve(&field, &[L, I, S, Z], Some(O), options),
            Ok(Outcome::NotFound)
        );
    }

    #[test]
    fn test_budget_distinguishes_inconclusive() {
        let field = field(&["XX........", "XXX.......", "XXXX...X..", "XXX....XXX"]);
        let mut solver = PerfectSolver::default();
        let options = SearchOptions::default().with_max_nodes(1);
        let outcome = solver.solve(&field, &[I, O, L, J, L, S], Some(O), options);
        assert_eq!(outcome, Ok(Outcome::Inconclusive));
        assert_eq!(solver.stats().nodes, 1);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel_matches_sequential() {
        use pcfind_solver::search_perfect_parallel;

        let found = search_perfect_parallel(&well(), &[T, J, I], None, SearchOptions::default()).unwrap();
        let Outcome::Found(path) = &found else {
            panic!("expected a perfect clear, got {found:?}");
        };
        assert!(replay(&well(), path).is_perfect());

        let field = field(&["XX....XXXX", "XXX...XXXX", "XXXX..XXXX", "XXX...XXXX"]);
        let options = SearchOptions::default().with_hold_used(true);
        assert_eq!(
            search_perfect_parallel(&field, &[L, I, S, Z], Some(O), options),
            Ok(Outcome::NotFound)
        );
    }

    #[test]
    fn test_canonical_choice_keeps_answers() {
        let canon = Canonicalizer::default()
            .with_canonical(O, Rotation::South)
            .and_then(|c| c.with_canonical(I, Rotation::East))
            .and_then(|c| c.with_canonical(S, Rotation::South))
            .and_then(|c| c.with_canonical(Z, Rotation::West))
            .unwrap();
        let mut solver = PerfectSolver::new(canon, SearchConfig::default());

        let open = field(&["X.........", "XX........", "XXXXX....X", "XXXX...XXX"]);
        let path = solver
            .find_perfect(&open, &[J, O, Z, O, Z, I], Some(I), SearchOptions::default())
            .unwrap()
            .expect("six-piece fixture clears");
        assert!(replay(&open, &path).is_perfect());

        let narrow = field(&["XX....XXXX", "XXX...XXXX", "XXXX..XXXX", "XXX...XXXX"]);
        let options = SearchOptions::default().with_hold_used(true);
        assert_eq!(solver.search_perfect(&narrow, &[L, I, S, Z], Some(O), options), Ok(false));

        for (order, hold) in [(vec![T, J, I], None), (vec![T, I], Some(O))] {
            assert_eq!(
                solver.search_perfect(&well(), &order, hold, SearchOptions::default()),
                Ok(true)
            );
        }
    }
}
