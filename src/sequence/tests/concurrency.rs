/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Tests for direct concurrent access to the shared sequence.

#[cfg(test)]
mod tests {
    use crate::sequence::SharedSequence;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_concurrent_inserts_lose_no_updates() {
        let sequence = Arc::new(SharedSequence::from_elements(vec![0; 10]));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let sequence = Arc::clone(&sequence);
                thread::spawn(move || {
                    for i in 0..250 {
                        assert!(sequence.insert_at(0, t * 1000 + i));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(sequence.len(), 10 + 8 * 250);
    }

    #[test]
    fn test_snapshots_never_see_partial_sort() {
        let sequence = Arc::new(SharedSequence::from_elements((0..500).rev().collect()));

        let writer = {
            let sequence = Arc::clone(&sequence);
            thread::spawn(move || {
                for _ in 0..200 {
                    sequence.sort_ascending();
                    sequence.sort_descending();
                }
            })
        };

        for _ in 0..200 {
            let snapshot = sequence.snapshot();
            assert_eq!(snapshot.len(), 500);
            let ascending = snapshot.windows(2).all(|w| w[0] <= w[1]);
            let descending = snapshot.windows(2).all(|w| w[0] >= w[1]);
            assert!(ascending || descending);
        }

        writer.join().unwrap();
    }
}
