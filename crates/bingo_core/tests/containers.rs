use bingo_core::{
    AdvancedTask, BingoTask, Completable, GridError, SimpleTask, Task, TaskContainer,
};

fn tasks(count: u32) -> Vec<Task> {
    (1..=count)
        .map(|id| Task::new(id, format!("goal {id}")))
        .collect()
}

#[test]
fn simple_task_complete_reset_and_describe() {
    let mut simple = SimpleTask::new(Task::new(3, "Walk dog"));
    assert_eq!(simple.describe(), "3: Walk dog [ ]");

    simple.complete();
    simple.complete();
    assert!(simple.task().is_completed);
    assert_eq!(simple.describe(), "3: Walk dog [✓]");

    simple.reset();
    assert!(!simple.is_completed());
}

#[test]
fn advanced_task_keeps_order_and_allows_duplicates() {
    let mut advanced = AdvancedTask::new();
    advanced.add_task(Task::new(1, "pack"));
    advanced.add_task(Task::new(2, "ship"));
    advanced.add_task(Task::new(1, "pack again"));

    let texts = advanced
        .all_tasks()
        .iter()
        .map(|task| task.text().to_string())
        .collect::<Vec<_>>();
    assert_eq!(texts, vec!["pack", "ship", "pack again"]);

    assert_eq!(advanced.remove_task(1), 2);
    assert_eq!(advanced.remove_task(1), 0);
    assert_eq!(advanced.len(), 1);
}

#[test]
fn advanced_task_snapshot_is_detached() {
    let mut advanced = AdvancedTask::from_tasks(tasks(2));
    let mut snapshot = advanced.all_tasks();
    snapshot[0].complete();
    snapshot.clear();

    assert_eq!(advanced.len(), 2);
    assert!(advanced.all_tasks().iter().all(|task| !task.is_completed));

    advanced.complete();
    assert!(advanced.is_completed());
    advanced.reset();
    assert!(advanced.all_tasks().iter().all(|task| !task.is_completed));
}

#[test]
fn grid_completes_cells_and_rejects_out_of_bounds() {
    let mut grid = BingoTask::new(3, tasks(9)).expect("valid grid");

    assert_eq!(grid.complete_task_at(1, 2), Ok(true));
    assert_eq!(grid.complete_task_at(1, 2), Ok(false));
    assert!(grid.task_at(1, 2).expect("in bounds").is_completed);
    assert_eq!(grid.completed_count(), 1);

    assert_eq!(
        grid.complete_task_at(3, 0),
        Err(GridError::OutOfBounds {
            row: 3,
            col: 0,
            size: 3
        })
    );
    assert!(grid.complete_task_at(0, 3).is_err());
    assert_eq!(grid.completed_count(), 1);

    grid.reset_grid();
    assert_eq!(grid.completed_count(), 0);
}

#[test]
fn container_enum_delegates_to_variant() {
    let mut containers: Vec<TaskContainer> = vec![
        SimpleTask::new(Task::new(1, "one")).into(),
        AdvancedTask::from_tasks(tasks(3)).into(),
        BingoTask::new(2, tasks(4)).expect("valid grid").into(),
    ];

    let kinds = containers.iter().map(TaskContainer::kind).collect::<Vec<_>>();
    assert_eq!(kinds, vec!["simple", "advanced", "bingo"]);
    let counts = containers
        .iter()
        .map(|container| container.tasks().len())
        .collect::<Vec<_>>();
    assert_eq!(counts, vec![1, 3, 4]);

    for container in &mut containers {
        container.complete();
    }
    assert!(containers.iter().all(|container| container.is_completed()));

    for container in &mut containers {
        container.reset();
    }
    assert!(containers
        .iter()
        .flat_map(|container| container.tasks())
        .all(|task| !task.is_completed));

    let TaskContainer::Bingo(grid) = &containers[2] else {
        panic!("expected bingo container");
    };
    assert!(!grid.is_fully_completed());
}
