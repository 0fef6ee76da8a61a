//! A `Calculator` service in the shape Thrift code generation would produce
//! for:
//!
//! ```text
//! enum Operation { ADD = 1, SUBTRACT = 2, MULTIPLY = 3, DIVIDE = 4 }
//!
//! struct Work {
//!   1: i32 num1,
//!   2: i32 num2,
//!   3: Operation op,
//!   4: optional string comment,
//! }
//!
//! exception InvalidOperation { 1: i32 what_op, 2: string why }
//! exception DivisionByZero { 1: string message }
//!
//! service Calculator {
//!   void ping(),
//!   i32 add(1: i32 num1, 2: i32 num2),
//!   i32 calculate(1: i32 logid, 2: Work w) throws (1: InvalidOperation ouch),
//!   double divide(1: double dividend, 2: double divisor)
//!       throws (1: DivisionByZero err, 2: InvalidOperation ouch),
//!   string echo(1: string message),
//!   string find(1: string key),
//!   string describe(3: string c, 1: i32 a, 2: i64 b),
//!   oneway void zip(),
//! }
//! ```

pub mod calculator;
pub mod types;
