/// Opcodes understood by the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, num_derive::FromPrimitive)]
pub enum AppOp {
    Redraw = 0,
    Rawkeys,
    Pump,
    Quit,
}

/// Scalar message posted to the main loop. `arg` carries the key for
/// `Rawkeys` and the pump generation for `Pump`.
#[derive(Debug, Clone, Copy)]
pub struct Message {
    pub id: usize,
    pub arg: usize,
}

impl Message {
    pub fn new_scalar(op: AppOp, arg: usize) -> Self {
        Self { id: op as usize, arg }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn test_opcode_decode() {
        let msg = Message::new_scalar(AppOp::Pump, 7);
        assert_eq!(AppOp::from_usize(msg.id), Some(AppOp::Pump));
        assert_eq!(msg.arg, 7);
        assert_eq!(AppOp::from_usize(Message::new_scalar(AppOp::Quit, 0).id), Some(AppOp::Quit));
        assert_eq!(AppOp::from_usize(99), None);
    }
}
