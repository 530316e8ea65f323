pub mod assemble;
pub mod crop;
pub mod locate;
pub mod resize;
