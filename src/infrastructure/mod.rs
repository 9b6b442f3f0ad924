pub mod seeder;
pub mod storage;
