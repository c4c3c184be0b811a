/// 1-based page cursor for a single fetch loop
pub struct PageIterator {
    current_page: usize,
    max_pages: usize,
}

impl PageIterator {
    pub fn new(max_pages: usize) -> Self {
        Self {
            current_page: 1,
            max_pages,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn has_reached_max(&self) -> bool {
        self.current_page > self.max_pages
    }

    pub fn advance(&mut self) {
        self.current_page += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_is_inclusive() {
        let mut pages = PageIterator::new(2);
        assert_eq!(pages.current_page(), 1);
        assert!(!pages.has_reached_max());

        pages.advance();
        assert!(!pages.has_reached_max());

        pages.advance();
        assert_eq!(pages.current_page(), 3);
        assert!(pages.has_reached_max());
    }
}
