pub mod promote;
pub mod release;
