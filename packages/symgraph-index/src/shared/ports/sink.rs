//! Graph sink port
//!
//! Accepts the open-ended stream of typed records plus a final flush. The
//! core is indifferent to the wire encoding; implementations synchronize
//! internally (methods take `&self` and are called from many workers).

use parking_lot::Mutex;

use crate::errors::Result;
use crate::shared::models::Element;

pub trait GraphSink: Send + Sync {
    fn emit(&self, element: &Element) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// In-memory sink, used by tests and as the reference implementation
#[derive(Debug, Default)]
pub struct MemorySink {
    elements: Mutex<Vec<Element>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn elements(&self) -> Vec<Element> {
        self.elements.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.elements.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.lock().is_empty()
    }
}

impl GraphSink for MemorySink {
    fn emit(&self, element: &Element) -> Result<()> {
        self.elements.lock().push(element.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{Element, Vertex};

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.emit(&Element::vertex(1, Vertex::ResultSet)).unwrap();
        sink.emit(&Element::vertex(2, Vertex::DefinitionResult))
            .unwrap();

        let elements = sink.elements();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].id, 1);
        assert_eq!(elements[1].id, 2);
    }
}
