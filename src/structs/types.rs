// 题目的唯一标识(UUID v4字符串)
pub type QuestionId = String;
// 分类的唯一标识
pub type CategoryId = String;
// 准备连接的db文件
pub type SqlFile = String;
