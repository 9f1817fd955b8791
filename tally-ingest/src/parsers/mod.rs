pub mod dated_amount;
