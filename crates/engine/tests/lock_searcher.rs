use pcfind_core::{Field, Piece, Rotation};
use pcfind_engine::{
    all_candidates, canonical_rotation_for, reachable_placements, Canonicalizer, LockSearcher,
    SearchConfig,
};

fn field(rows: &[&str]) -> Field {
    Field::from_pattern(23, 10, rows).unwrap()
}

/// Positions encoded as `y * 10 + x`, sorted.
fn encoded(found: Vec<(i32, i32)>) -> Vec<i32> {
    let mut codes: Vec<i32> = found.into_iter().map(|(x, y)| y * 10 + x).collect();
    codes.sort();
    codes
}

mod fixtures {
    use super::*;

    #[test]
    fn test_t_spawn_well() {
        let field = field(&["XXX....XXX", "XXXX...XXX", "XXXXX..XXX", "XXXX...XXX"]);
        let mut searcher = LockSearcher::new(&field, Piece::T, 20).unwrap();
        assert_eq!(
            encoded(searcher.search(Rotation::North)),
            vec![5, 25, 34, 41, 42, 43, 46, 47, 48]
        );
    }

    #[test]
    fn test_t_spawn_well_with_sealed_holes() {
        // holes on the left are covered and must not change the answer
        let field = field(&["XXX....XXX", "X.XX...XXX", "...XX..XXX", "X.XX...XXX"]);
        let mut searcher = LockSearcher::new(&field, Piece::T, 20).unwrap();
        assert_eq!(
            encoded(searcher.search(Rotation::North)),
            vec![5, 25, 34, 41, 42, 43, 46, 47, 48]
        );
    }

    #[test]
    fn test_t_west_on_shelf() {
        let field = field(&["XXXX......", "XXX..XXXXX", "XXXX.XXXXX"]);
        let mut searcher = LockSearcher::new(&field, Piece::T, 5).unwrap();
        assert_eq!(
            encoded(searcher.search(Rotation::West)),
            vec![34, 35, 36, 37, 38, 39, 41, 42, 43]
        );
    }

    #[test]
    fn test_t_all_rotations_repeated() {
        let field = field(&["XX.....XXX", "XXX....XXX", "XXXX...XXX", "XXX....XXX"]);
        let mut searcher = LockSearcher::new(&field, Piece::T, 4).unwrap();

        for _ in 0..10 {
            assert_eq!(encoded(searcher.search(Rotation::North)), vec![4, 5, 24, 33]);
            assert_eq!(encoded(searcher.search(Rotation::East)), vec![14, 15, 33]);
            assert_eq!(encoded(searcher.search(Rotation::South)), vec![15, 24, 33]);
            assert_eq!(encoded(searcher.search(Rotation::West)), vec![15, 16, 24, 33]);
        }
    }

    #[test]
    fn test_j_through_notch() {
        let field = field(&["XXX.XXXXXX", "XXX...XXXX"]);
        let mut searcher = LockSearcher::new(&field, Piece::J, 5).unwrap();
        assert_eq!(
            encoded(searcher.search(Rotation::North)),
            vec![4, 21, 22, 23, 24, 25, 26, 27, 28]
        );
    }
}

mod properties {
    use super::*;

    fn sorted(mut v: Vec<(i32, i32)>) -> Vec<(i32, i32)> {
        v.sort();
        v
    }

    #[test]
    fn test_equivalent_rotations_report_same_set() {
        let field = field(&["XX......XX", "X...X..XXX", "XX.XX.XXXX"]);
        let canon = Canonicalizer::default();
        for piece in Piece::ALL {
            for rotation in Rotation::ALL {
                let canonical = canonical_rotation_for(piece, rotation);
                let direct = reachable_placements(&field, piece, rotation, 4).unwrap();
                let via = reachable_placements(&field, piece, canonical, 4).unwrap();
                assert_eq!(sorted(direct), sorted(via), "{piece:?} {rotation:?}");
                assert!(canon
                    .equivalent_rotations(piece, rotation)
                    .any(|r| r == rotation));
            }
        }
    }

    #[test]
    fn test_folded_placements_match_direct_search() {
        // folding a non-canonical rotation's own results lands on candidates
        let field = field(&["XXX....XXX", "XXXX..XXXX"]);
        let canon = Canonicalizer::default();
        for piece in [Piece::S, Piece::Z, Piece::I, Piece::O] {
            let mut searcher = LockSearcher::new(&field, piece, 4).unwrap();
            for rotation in Rotation::ALL {
                let canonical = canon.canonical_rotation(piece, rotation);
                let top = piece.cells(canonical).iter().map(|c| c.1 as i32).max().unwrap();
                let folded = canon.to_canonical_offsets(piece, rotation, &searcher.search(rotation));
                let candidates = reachable_placements(&field, piece, rotation, 4).unwrap();
                for pos in folded.into_iter().filter(|p| p.1 + top < 4) {
                    assert!(candidates.contains(&pos), "{piece:?} {rotation:?} {pos:?}");
                }
            }
        }
    }

    #[test]
    fn test_o_under_roof_stops_at_pillar() {
        // two-row tunnel entered through the gap in the roof; the pillar at
        // column 7 walls off the right end
        let field = field(&["XXXX..XXXX", ".......X..", ".......X.."]);
        let found = reachable_placements(&field, Piece::O, Rotation::North, 4).unwrap();
        assert_eq!(sorted(found), (0..=5).map(|x| (x, 0)).collect::<Vec<_>>());
    }

    #[test]
    fn test_results_respect_row_bound() {
        let field = field(&["X........X", "XX......XX"]);
        for piece in Piece::ALL {
            for rotation in Rotation::ALL {
                let canonical = canonical_rotation_for(piece, rotation);
                for (x, y) in reachable_placements(&field, piece, rotation, 3).unwrap() {
                    let top = piece
                        .cells(canonical)
                        .iter()
                        .map(|&(_, dy)| y + dy as i32)
                        .max()
                        .unwrap();
                    assert!(top < 3);
                    assert!(field.can_place(piece, canonical, x, y));
                }
            }
        }
    }

    fn occupied_cells(placements: Vec<pcfind_core::Placement>) -> Vec<[(i32, i32); 4]> {
        let mut sets: Vec<_> = placements
            .into_iter()
            .map(|p| {
                let mut cells = p.cells();
                cells.sort();
                cells
            })
            .collect();
        sets.sort();
        sets
    }

    #[test]
    fn test_canonical_choice_keeps_reachable_cells() {
        let fields = [
            field(&["XX......XX", "X...X..XXX", "XX.XX.XXXX"]),
            field(&["XXX....XXX", "XXXX..XXXX"]),
            field(&["X.X.X.X.X.", ".X.X.X.X.X"]),
            field(&["XXXX..XXXX", ".......X..", ".......X.."]),
        ];
        let config = SearchConfig::default();
        let default = Canonicalizer::default();

        for field in &fields {
            for piece in [Piece::S, Piece::Z, Piece::I, Piece::O] {
                let expected = occupied_cells(all_candidates(field, piece, 4, &default, &config).unwrap());
                for rotation in Rotation::ALL {
                    let canon = Canonicalizer::default().with_canonical(piece, rotation).unwrap();
                    assert_eq!(canon.canonical_rotation(piece, rotation), rotation);
                    let found = occupied_cells(all_candidates(field, piece, 4, &canon, &config).unwrap());
                    assert_eq!(found, expected, "{piece:?} canonical {rotation:?}\n{field}");
                }
            }
        }
    }
}
