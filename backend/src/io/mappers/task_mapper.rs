use shared::TaskView;

use crate::domain::models::Task;

pub struct TaskMapper;

impl TaskMapper {
    pub fn to_dto(task: &Task) -> TaskView {
        TaskView {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date.clone(),
            points: task.points,
            assigned_to: task.assigned_to.clone(),
            created_by: task.created_by.clone(),
            status: task.status.as_str().to_string(),
            rating: task.rating,
            completed_date: task.completed_date.clone(),
        }
    }

    pub fn to_dto_list<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<TaskView> {
        tasks.into_iter().map(Self::to_dto).collect()
    }
}
