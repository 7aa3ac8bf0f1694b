use rand::Rng;

/// Values a brand-new attendance row starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialMarks {
    pub percentage: i64,
    pub isa1: i64,
    pub isa2: i64,
    pub esa: i64,
}

/// Decides what an attendance row looks like at enrollment time. The
/// enrollment transaction never embeds these numbers itself, so a
/// deployment can swap the policy without touching the transaction.
pub trait MarksPolicy: Send + Sync {
    fn initial_marks(&self) -> InitialMarks;
}

/// Placeholder/demo data: plausible-looking marks drawn uniformly at
/// random. A real deployment would use [`BlankMarks`] and fill the row in
/// as assessments happen.
pub struct DemoMarks;

impl MarksPolicy for DemoMarks {
    fn initial_marks(&self) -> InitialMarks {
        let mut rng = rand::rng();
        InitialMarks {
            percentage: rng.random_range(70..=100),
            isa1: rng.random_range(15..=25),
            isa2: rng.random_range(15..=25),
            esa: rng.random_range(50..=100),
        }
    }
}

/// Start every attendance row zeroed.
pub struct BlankMarks;

impl MarksPolicy for BlankMarks {
    fn initial_marks(&self) -> InitialMarks {
        InitialMarks {
            percentage: 0,
            isa1: 0,
            isa2: 0,
            esa: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_marks_stay_in_range() {
        let policy = DemoMarks;
        for _ in 0..100 {
            let marks = policy.initial_marks();
            assert!((70..=100).contains(&marks.percentage));
            assert!((15..=25).contains(&marks.isa1));
            assert!((15..=25).contains(&marks.isa2));
            assert!((50..=100).contains(&marks.esa));
        }
    }

    #[test]
    fn test_blank_marks_are_zeroed() {
        let marks = BlankMarks.initial_marks();
        assert_eq!(
            marks,
            InitialMarks {
                percentage: 0,
                isa1: 0,
                isa2: 0,
                esa: 0
            }
        );
    }
}
