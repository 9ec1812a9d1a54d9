use std::collections::HashMap;

/// Frame offsets for named variables, assigned in first-use order.
#[derive(Debug)]
pub(super) struct LocalVariables {
    locals: HashMap<String, usize>,
    last_offset: usize,
}

impl LocalVariables {
    pub fn new() -> Self {
        Self {
            locals: HashMap::new(),
            last_offset: 0,
        }
    }

    /// Total frame size consumed so far.
    pub fn get_last_offset(&self) -> usize {
        self.last_offset
    }

    /// Offset of `name` below rbp, allocating an 8-byte slot on first use.
    pub fn get_lvar_offset(&mut self, name: &str) -> usize {
        if let Some(offset) = self.locals.get(name) {
            return *offset;
        }
        self.last_offset += 8;
        let offset = self.last_offset;
        self.locals.insert(name.to_string(), offset);
        offset
    }
}
