pub mod activities_repo;
