// src/crawl/batch.rs
// =============================================================================
// Splits a list of page URLs into batches.
//
// A batch is only a chunking convenience: its pages are crawled together and
// written to one file. Batch numbers are 1-based and keep counting across
// sitemaps, so the caller passes in the next free number and gets back
// batches numbered from there.
// =============================================================================

/// Up to `batch_size` page URLs, crawled and written together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Run-wide batch number, also used in the output file name
    pub index: usize,
    pub urls: Vec<String>,
}

/// Chunks `urls` into batches of at most `batch_size`, numbered consecutively
/// from `first_index`. Produces ceil(len / batch_size) batches; an empty
/// input produces none.
///
/// `batch_size` must be non-zero; `Config::validate` guarantees this for
/// values coming from the command line.
pub fn chunk_batches(urls: Vec<String>, batch_size: usize, first_index: usize) -> Vec<Batch> {
    assert!(batch_size > 0, "batch size must be at least 1");

    urls.chunks(batch_size)
        .enumerate()
        .map(|(offset, chunk)| Batch {
            index: first_index + offset,
            urls: chunk.to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://example.com/q/{i}")).collect()
    }

    #[test]
    fn test_batch_count_is_ceiling() {
        for (len, expected) in [(0, 0), (1, 1), (49, 1), (50, 1), (51, 2), (100, 2), (101, 3), (237, 5)] {
            assert_eq!(chunk_batches(urls(len), 50, 1).len(), expected, "len = {len}");
        }
    }

    #[test]
    fn test_batches_reconstruct_input() {
        let input = urls(123);
        let batches = chunk_batches(input.clone(), 50, 1);

        assert!(batches.iter().all(|b| !b.urls.is_empty() && b.urls.len() <= 50));
        let joined: Vec<String> = batches.into_iter().flat_map(|b| b.urls).collect();
        assert_eq!(joined, input);
    }

    #[test]
    fn test_indices_continue_from_first_index() {
        let batches = chunk_batches(urls(7), 3, 5);
        let indices: Vec<usize> = batches.iter().map(|b| b.index).collect();
        assert_eq!(indices, vec![5, 6, 7]);
        assert_eq!(batches[2].urls.len(), 1);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let input = vec!["https://example.com/a".to_string(); 3];
        let batches = chunk_batches(input, 50, 1);
        assert_eq!(batches[0].urls.len(), 3);
    }

    #[test]
    #[should_panic]
    fn test_zero_batch_size_panics() {
        chunk_batches(urls(3), 0, 1);
    }
}
