pub mod in_memory_repository;
